use crate::film::Film;
use crate::math::RGBColor;

use rayon::prelude::*;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Ppm,
    Bmp,
    Hdr,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Hdr => "hdr",
        }
    }
}

pub fn gamma_encode(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0).powf(1.0 / 2.2) * 255.0).round() as u8
}

/// Writes the film to disk, logging on failure. The encoder either
/// produces the complete stream or reports failure; a partial file is
/// never considered written.
pub fn save_film<P: AsRef<Path>>(film: &Film, path: P, format: ImageFormat) -> bool {
    let path = path.as_ref();
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        match format {
            ImageFormat::Ppm => write_ppm(film, &mut writer),
            ImageFormat::Bmp => write_bmp(film, &mut writer),
            ImageFormat::Hdr => write_hdr(film, &mut writer),
        }
        .and_then(|_| writer.flush())
    });

    match result {
        Ok(()) => {
            info!("wrote {}", path.display());
            true
        }
        Err(e) => {
            error!("failed to write {}: {}", path.display(), e);
            false
        }
    }
}

pub fn write_ppm<W: Write>(film: &Film, writer: &mut W) -> io::Result<()> {
    write!(writer, "P3\n{} {}\n255\n", film.width, film.height)?;

    let rows: Vec<String> = film
        .buffer
        .par_chunks(film.width)
        .map(|row| {
            let mut text = String::with_capacity(row.len() * 12);
            for pixel in row {
                text.push_str(&format!(
                    "{}  {}  {}\n",
                    gamma_encode(pixel.r),
                    gamma_encode(pixel.g),
                    gamma_encode(pixel.b)
                ));
            }
            text
        })
        .collect();

    for row in rows {
        writer.write_all(row.as_bytes())?;
    }
    Ok(())
}

pub fn write_bmp<W: Write>(film: &Film, writer: &mut W) -> io::Result<()> {
    const FILE_HEADER_SIZE: u32 = 14;
    const INFO_HEADER_SIZE: u32 = 40;
    let channels = 3u32;

    let width = film.width as u32;
    let height = film.height as u32;
    let padded_line_bytes = (width * channels + 3) & !3;
    let padded_image_bytes = padded_line_bytes * height;

    // file header
    writer.write_all(b"BM")?;
    writer.write_all(&(FILE_HEADER_SIZE + INFO_HEADER_SIZE + padded_image_bytes).to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // reserved
    writer.write_all(&(FILE_HEADER_SIZE + INFO_HEADER_SIZE).to_le_bytes())?;

    // info header
    writer.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?;
    writer.write_all(&1i16.to_le_bytes())?; // color planes
    writer.write_all(&((channels * 8) as i16).to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // compression
    writer.write_all(&0u32.to_le_bytes())?; // image bytes
    writer.write_all(&0u32.to_le_bytes())?; // x pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // colors used
    writer.write_all(&0u32.to_le_bytes())?; // important colors

    let rows: Vec<Vec<u8>> = film
        .buffer
        .par_chunks(film.width)
        .map(|row| {
            let mut line = vec![0u8; padded_line_bytes as usize];
            for (x, pixel) in row.iter().enumerate() {
                // BGR
                line[3 * x] = gamma_encode(pixel.b);
                line[3 * x + 1] = gamma_encode(pixel.g);
                line[3 * x + 2] = gamma_encode(pixel.r);
            }
            line
        })
        .collect();

    // bmp stores scanlines bottom to top
    for row in rows.iter().rev() {
        writer.write_all(row)?;
    }
    Ok(())
}

fn rgbe(color: &RGBColor) -> [u8; 4] {
    let v = color.r.max(color.g).max(color.b);
    if v < 1e-32 {
        return [0, 0, 0, 0];
    }

    /*
       write:
            v = m * 2^e  (0.5 <= m < 1)
            r = R * m * 256 / v
       read:
            R = r * 2^(e - 128 - 8)
    */
    let e = v.log2().floor() as i32 + 1;
    let m = v * (-e as f32).exp2();
    let factor = m * 256.0 / v;

    [
        (color.r * factor) as u8,
        (color.g * factor) as u8,
        (color.b * factor) as u8,
        (e + 128) as u8,
    ]
}

pub fn write_hdr<W: Write>(film: &Film, writer: &mut W) -> io::Result<()> {
    write!(
        writer,
        "#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y {} +X {}\n",
        film.height, film.width
    )?;

    for pixel in &film.buffer {
        writer.write_all(&rgbe(pixel))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_film() -> Film {
        let mut film = Film::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                let level = (y * 3 + x) as f32 / 5.0;
                film.add_color(x, y, RGBColor::new(level, 1.0 - level, 0.5));
            }
        }
        film
    }

    #[test]
    fn test_ppm_bytes_round_trip() {
        let film = gradient_film();
        let mut bytes = Vec::new();
        write_ppm(&film, &mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("3 2"));
        assert_eq!(lines.next(), Some("255"));

        // every encoded byte reproduces the gamma mapping exactly
        for (line, pixel) in lines.zip(film.buffer.iter()) {
            let values: Vec<u8> = line
                .split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect();
            assert_eq!(
                values,
                vec![
                    gamma_encode(pixel.r),
                    gamma_encode(pixel.g),
                    gamma_encode(pixel.b)
                ]
            );
        }
    }

    #[test]
    fn test_bmp_layout() {
        let film = gradient_film();
        let mut bytes = Vec::new();
        write_bmp(&film, &mut bytes).unwrap();

        // 3 pixels * 3 channels = 9 bytes per line, padded to 12
        let stride = 12;
        assert_eq!(bytes.len(), 54 + stride * 2);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(
            u32::from_le_bytes(bytes[2..6].try_into().unwrap()),
            (54 + stride * 2) as u32
        );
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
        assert_eq!(
            u16::from_le_bytes(bytes[28..30].try_into().unwrap()),
            24,
            "bits per pixel"
        );

        // bottom-up: the first stored scanline is film row 1, in BGR order
        let bottom_left = film.at(0, 1);
        assert_eq!(bytes[54], gamma_encode(bottom_left.b));
        assert_eq!(bytes[55], gamma_encode(bottom_left.g));
        assert_eq!(bytes[56], gamma_encode(bottom_left.r));

        let top_left = film.at(0, 0);
        assert_eq!(bytes[54 + stride], gamma_encode(top_left.b));
    }

    #[test]
    fn test_hdr_header_and_rgbe() {
        let mut film = Film::new(2, 1);
        film.add_color(0, 0, RGBColor::new(1.0, 0.5, 0.25));
        // second pixel below the zero threshold
        film.add_color(1, 0, RGBColor::new(1e-36, 0.0, 0.0));

        let mut bytes = Vec::new();
        write_hdr(&film, &mut bytes).unwrap();

        let header = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 2\n";
        assert_eq!(&bytes[..header.len()], header);

        // v = 1.0 -> m = 0.5, e = 1 -> factor 128
        let body = &bytes[header.len()..];
        assert_eq!(body, &[128, 64, 32, 129, 0, 0, 0, 0]);
    }

    #[test]
    fn test_gamma_encode_endpoints() {
        assert_eq!(gamma_encode(0.0), 0);
        assert_eq!(gamma_encode(1.0), 255);
        assert_eq!(gamma_encode(2.5), 255);
        assert_eq!(gamma_encode(-1.0), 0);
        // gamma brightens mid tones
        assert!(gamma_encode(0.5) > 127);
    }

    #[test]
    fn test_save_film_reports_failure_for_bad_path() {
        let film = gradient_film();
        assert!(!save_film(
            &film,
            "definitely/not/a/real/directory/image.ppm",
            ImageFormat::Ppm
        ));
    }

    #[test]
    fn test_save_film_writes_complete_file() {
        let film = gradient_film();
        let path = std::env::temp_dir().join("rust_raytracer_output_test.bmp");
        assert!(save_film(&film, &path, ImageFormat::Bmp));
        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(on_disk.len(), 54 + 12 * 2);
        std::fs::remove_file(&path).unwrap();
    }
}
