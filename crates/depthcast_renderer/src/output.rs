//! Image output.
//!
//! Plain-text PPM ("P3") is written directly: a `P3` line, a `<width> <height>`
//! line, a `255` line, then one line per image row with space-separated
//! `r g b` triples. Any other extension is encoded through the `image` crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{ImageBuffer, OutputError, Pixel};

/// Write the PPM header for a `width` x `height` image.
pub fn write_ppm_header<W: Write>(writer: &mut W, width: u32, height: u32) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")
}

/// Write one image row as a PPM text line.
pub fn write_ppm_row<W: Write>(writer: &mut W, row: &[Pixel]) -> io::Result<()> {
    for (i, [r, g, b]) in row.iter().enumerate() {
        if i > 0 {
            write!(writer, " ")?;
        }
        write!(writer, "{} {} {}", r, g, b)?;
    }
    writeln!(writer)
}

/// Stream rows into a PPM. `rows` must yield `height` rows of `width` pixels.
pub fn write_ppm_rows<W, I, R>(writer: &mut W, width: u32, height: u32, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: AsRef<[Pixel]>,
{
    write_ppm_header(writer, width, height)?;
    for row in rows {
        write_ppm_row(writer, row.as_ref())?;
    }
    writer.flush()
}

/// Write a whole image as PPM.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    write_ppm_rows(writer, image.width, image.height, image.rows())
}

/// Save an image, picking the format from the file extension.
///
/// `.ppm` is written as text PPM; everything else goes through `image`.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
    } else {
        image::save_buffer(
            path,
            &image.to_rgb_bytes(),
            image.width,
            image.height,
            image::ColorType::Rgb8,
        )?;
    }

    log::info!(
        "Saved {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}
