use clap::{App, Arg, ArgMatches};
use failure::format_err;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use log::info;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use mandelview::colour::to_rgb_bytes;
use mandelview::{CancelToken, Complex, EscapeTimeRenderer, RenderParams, Viewer};

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

/// Four comma separated canvas coordinates: x1,y1,x2,y2.
fn parse_selection(s: &str) -> Option<((f64, f64), (f64, f64))> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| f64::from_str(v.trim()))
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Some(((*x1, *y1), (*x2, *y2))),
        _ => None,
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        Some(_) => Err("Image dimensions must be greater than zero".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn validate_complex(s: &str, which: &str) -> Result<(), String> {
    Complex::from_str(s)
        .map(|_| ())
        .map_err(|e| format!("Could not parse {}: {}", which, e))
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

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CORNER_A: &str = "corner-a";
const CORNER_B: &str = "corner-b";
const RADIUS: &str = "radius";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const SELECT: &str = "select";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelview")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_size(&s))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(CORNER_A)
                .required(false)
                .long(CORNER_A)
                .short("a")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2-2i")
                .validator(|s| validate_complex(&s, "corner a"))
                .help("One corner of the viewport, as R+Ii"),
        )
        .arg(
            Arg::with_name(CORNER_B)
                .required(false)
                .long(CORNER_B)
                .short("b")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2+2i")
                .validator(|s| validate_complex(&s, "corner b"))
                .help("The opposite corner of the viewport, as R+Ii"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("4")
                .validator(|s| {
                    f64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse escape radius".to_string())
                })
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iterations before a point counts as bounded"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to render with (default: all cores)"),
        )
        .arg(
            Arg::with_name(SELECT)
                .required(false)
                .long(SELECT)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| match parse_selection(&s) {
                    Some(_) => Ok(()),
                    None => Err("Selection must be x1,y1,x2,y2".to_string()),
                })
                .help("Zoom into a rectangle dragged across the image, in pixels"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, failure::Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let output = value(matches, OUTPUT)?;
    let (width, height) = parse_pair::<usize>(value(matches, SIZE)?, 'x')
        .ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let radius = f64::from_str(value(matches, RADIUS)?)?;
    let iterations = usize::from_str(value(matches, ITERATIONS)?)?;
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t)?,
        None => num_cpus::get(),
    };

    let mut viewer = Viewer::new(width, height);
    viewer.set_corners(value(matches, CORNER_A)?, value(matches, CORNER_B)?)?;
    if let Some(selection) = matches.value_of(SELECT) {
        let (start, end) =
            parse_selection(selection).ok_or_else(|| format_err!("Error parsing selection"))?;
        viewer.select(start, end, width as f64, height as f64)?;
    }

    let (a, b) = viewer.view();
    let renderer = EscapeTimeRenderer::new(a, b, width, height, RenderParams::new(radius, iterations)?)?;
    info!(
        "rendering {:?} at {}x{}",
        renderer.plane().complex_plane,
        width,
        height
    );
    let pixels = renderer.render_threaded(threads, &CancelToken::new())?;

    write_image(output, &to_rgb_bytes(&pixels), (width, height))?;
    info!("wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        for cause in e.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
