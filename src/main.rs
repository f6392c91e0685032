extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelzoom;
extern crate minifb;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use minifb::{Window, WindowOptions};
use num::Complex;
use std::str::FromStr;

use mandelzoom::{
    run_zoom, FramePresenter, Palette, RenderPool, Surface, ViewBounds, ViewportScaler, ZoomError,
};

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const CENTER: &str = "center";
const DIAMETER: &str = "diameter";
const WIDTH: &str = "width";
const ZOOM: &str = "zoom";
const FRAMES: &str = "frames";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .about("Animated zoom into the Mandelbrot set")
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("-0.75,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the center point"))
                .help("Center of the zoom on the complex plane"),
        )
        .arg(
            Arg::with_name(DIAMETER)
                .required(false)
                .long(DIAMETER)
                .short("d")
                .takes_value(true)
                .default_value("3.5,2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the plane diameters"))
                .help("Initial x,y diameters of the viewed plane rectangle"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("800")
                .validator(move |s| {
                    validate_range(
                        &s,
                        16usize,
                        8192,
                        "Could not parse the window width",
                        "Window width must be between 16 and 8192",
                    )
                })
                .help("Window width in pixels; height follows the plane aspect"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("0.05")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1e-6f64,
                        0.5,
                        "Could not parse the zoom rate",
                        "Zoom rate must be between 0.000001 and 0.5",
                    )
                })
                .help("Fraction of the viewport removed per frame"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("2000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1u64,
                        10_000_000,
                        "Could not parse the frame count",
                        "Frame count must be between 1 and 10000000",
                    )
                })
                .help("Frames to render before quitting"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("4")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of render worker slots"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("512")
                .validator(move |s| {
                    validate_range(
                        &s,
                        16u32,
                        65536,
                        "Could not parse iteration count",
                        "Iteration count must be between 16 and 65536",
                    )
                })
                .help("Escape iteration limit per pixel"),
        )
        .get_matches()
}

/// The real window.  `with_pixels` hands out the staging buffer; the
/// flip pushes it to the screen and reports a closed or broken window
/// as a lost surface.
struct WindowSurface {
    window: Window,
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl WindowSurface {
    fn open(width: usize, height: usize) -> Result<WindowSurface, ZoomError> {
        let window = Window::new(
            "mandelzoom",
            width,
            height,
            WindowOptions::default(),
        )
        .map_err(|e| ZoomError::SurfaceLost {
            reason: format!("could not open the window: {}", e),
        })?;
        Ok(WindowSurface {
            window,
            pixels: vec![0; width * height],
            width,
            height,
        })
    }
}

impl Surface for WindowSurface {
    fn with_pixels<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [u32]),
    {
        f(&mut self.pixels);
    }

    fn flip(&mut self) -> Result<(), ZoomError> {
        if !self.window.is_open() {
            return Err(ZoomError::SurfaceLost {
                reason: "window was closed".to_string(),
            });
        }
        self.window
            .update_with_buffer(&self.pixels, self.width, self.height)
            .map_err(|e| ZoomError::SurfaceLost {
                reason: e.to_string(),
            })
    }
}

fn run() -> Result<(), ZoomError> {
    let matches = args();
    let center = parse_complex(matches.value_of(CENTER).unwrap())
        .expect("Error parsing the center point");
    let (dx, dy) = parse_pair::<f64>(matches.value_of(DIAMETER).unwrap(), ',')
        .expect("Error parsing the plane diameters");
    let width = usize::from_str(matches.value_of(WIDTH).unwrap())
        .expect("Could not parse the window width");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap())
        .expect("Could not parse the zoom rate");
    let frames = u64::from_str(matches.value_of(FRAMES).unwrap())
        .expect("Could not parse the frame count");
    let threads = usize::from_str(matches.value_of(THREADS).unwrap())
        .expect("Could not parse thread count");
    let limit = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count");

    // All bounds validation happens here, before any worker or window
    // exists; a bad rectangle never starts the pipeline.
    let bounds = ViewBounds::from_center(center, dx, dy)?;
    let mut scaler = ViewportScaler::new(bounds, zoom)?;

    // Preserve the plane's aspect ratio in the pixel grid.
    let height = ((width as f64) / dx * dy) as usize;
    info!("window size {} by {}", width, height);

    let presenter = FramePresenter::new(Palette::classic(limit));
    let mut surface = WindowSurface::open(width, height)?;
    let mut pool = RenderPool::new(threads, width, height, limit, bounds);

    run_zoom(&mut pool, &mut scaler, &presenter, &mut surface, frames)
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("mandelzoom: {}", e);
        std::process::exit(1);
    }
}
