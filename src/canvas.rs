use std::io::{ self, Write, BufWriter };
use std::fs::File;
use std::path::Path;

use crate::color::Rgb;
use crate::consts::CHANNEL_MAX;

/// Maximum line length of an encoded PPM file.
const PPM_LINE_WIDTH: usize = 70;

/// A canvas for drawing pixels.
///
/// Stores the colors computed for each camera ray. Once rendering finishes,
/// the `Canvas` can be used to save the pixels to an image file.
///
/// For now, only PPM images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored row-major as a flattened vector.
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Rgb::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Rows and columns are zero-indexed,
    /// with row 0 at the top of the image. Colors are stored unclamped.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the second row, fourth column on an 8-by-8 canvas:
    ///
    /// ```
    /// # use mirror_tracer::color::Rgb;
    /// # use mirror_tracer::canvas::Canvas;
    /// let purple = Rgb::rgb(255, 0, 255);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(2, 4, purple);
    /// assert_eq!(canvas.read_pixel(2, 4), Some(purple));
    /// ```
    pub fn write_pixel(&mut self, row: usize, column: usize, pixel: Rgb) {
        // Silently ignore out-of-bounds pixels
        if column >= self.width || row >= self.height {
            return;
        }

        self.pixels[(row * self.width) + column] = pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Returns `None` if the location is out-of-bounds.
    pub fn read_pixel(&self, row: usize, column: usize) -> Option<Rgb> {
        if column >= self.width || row >= self.height {
            return None
        }

        Some(self.pixels[(row * self.width) + column])
    }

    /// Encodes the canvas as a plain (P3) PPM image.
    ///
    /// Channels are clamped to 0-255. Every row starts on a new line and no
    /// line exceeds 70 columns.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", CHANNEL_MAX)?;

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut col = 0;
            for pixel in row {
                let pixel = pixel.clamped();
                for channel in [pixel.x, pixel.y, pixel.z] {
                    let s = channel.to_string();

                    if col == 0 {
                        write!(out, "{}", s)?;
                        col = s.len();
                    } else if col + 1 + s.len() > PPM_LINE_WIDTH {
                        write!(out, "\n{}", s)?;
                        col = s.len();
                    } else {
                        write!(out, " {}", s)?;
                        col += s.len() + 1;
                    }
                }
            }

            writeln!(out)?;
        }

        out.flush()
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let out = BufWriter::new(File::create(path)?);
        self.write_ppm(out)
    }
}

#[cfg(test)]
fn encode(canvas: &Canvas) -> String {
    let mut buf = Vec::new();
    canvas.write_ppm(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert_eq!(c.read_pixel(19, 9), Some(Rgb::black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(4, 2);
    c.write_pixel(2, 0, Rgb::white());
    c.write_pixel(0, 4, Rgb::white());

    assert_eq!(c.read_pixel(2, 0), None);
    assert_eq!(c.read_pixel(0, 4), None);
    assert!((0..2).all(|r| (0..4).all(|col|
        c.read_pixel(r, col) == Some(Rgb::black()))));
}

#[test]
fn ppm_header_and_clamping() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, Rgb::rgb(400, 0, 0));
    c.write_pixel(1, 1, Rgb::rgb(0, 128, 0));
    c.write_pixel(1, 2, Rgb::rgb(-5, 0, 255));

    let ppm = encode(&c);
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(lines[0], "P3");
    assert_eq!(lines[1], "3 2");
    assert_eq!(lines[2], "255");
    assert_eq!(lines[3], "255 0 0 0 0 0 0 0 0");
    assert_eq!(lines[4], "0 0 0 0 128 0 0 0 255");
    assert!(ppm.ends_with('\n'));
}

#[test]
fn ppm_lines_are_wrapped() {
    let mut c = Canvas::new(10, 2);
    for row in 0..2 {
        for column in 0..10 {
            c.write_pixel(row, column, Rgb::rgb(255, 204, 153));
        }
    }

    let ppm = encode(&c);
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert!(body.iter().all(|l| l.len() <= 70));
    assert_eq!(body[0],
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204");
    assert_eq!(body[1],
        "153 255 204 153 255 204 153 255 204 153 255 204 153");
}
