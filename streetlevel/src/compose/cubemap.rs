//! Cubemap face arrangement.

use super::canvas::{new_canvas, paste};
use super::output::StitchedOutput;
use crate::error::PanoramaError;
use image::RgbImage;
use std::fmt;
use std::str::FromStr;

/// One of the six directions of a cubemap.
///
/// The discriminant is the face's position in a face list; Streetside
/// addresses the faces with ids `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubemapFace {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
    Top = 4,
    Bottom = 5,
}

impl CubemapFace {
    /// All faces in list order.
    pub const ALL: [CubemapFace; 6] = [
        CubemapFace::Front,
        CubemapFace::Right,
        CubemapFace::Back,
        CubemapFace::Left,
        CubemapFace::Top,
        CubemapFace::Bottom,
    ];

    /// Position of this face in a face list.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Streetside face id (1..=6).
    pub fn id(self) -> u8 {
        self as u8 + 1
    }
}

/// How six cube faces are returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CubemapStitchingMethod {
    /// Return the six faces as separate images.
    None,
    /// One 4×3 image laid out as an unfolded cube:
    ///
    /// ```text
    ///        [Top]
    /// [Left][Front][Right][Back]
    ///        [Bottom]
    /// ```
    Net,
    /// One 6×1 image with the faces left to right in face order.
    #[default]
    Row,
}

impl CubemapStitchingMethod {
    /// Lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CubemapStitchingMethod::None => "none",
            CubemapStitchingMethod::Net => "net",
            CubemapStitchingMethod::Row => "row",
        }
    }
}

impl fmt::Display for CubemapStitchingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CubemapStitchingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(CubemapStitchingMethod::None),
            "net" => Ok(CubemapStitchingMethod::Net),
            "row" => Ok(CubemapStitchingMethod::Row),
            other => Err(format!(
                "unknown stitching method '{}' (expected none, net or row)",
                other
            )),
        }
    }
}

/// Arranges six faces of side `face_side` according to `method`.
///
/// `faces` must be in [`CubemapFace`] order.
///
/// # Errors
///
/// `InvalidState` if the arranged image would exceed `u32` pixels per side.
pub fn compose_cubemap(
    faces: [RgbImage; 6],
    face_side: u32,
    method: CubemapStitchingMethod,
) -> Result<StitchedOutput, PanoramaError> {
    let output = match method {
        CubemapStitchingMethod::None => StitchedOutput::Faces(faces),
        CubemapStitchingMethod::Row => StitchedOutput::Image(compose_row(&faces, face_side)?),
        CubemapStitchingMethod::Net => StitchedOutput::Image(compose_net(&faces, face_side)?),
    };
    Ok(output)
}

/// Black canvas of `cols × rows` faces.
fn face_grid(side: u32, cols: u32, rows: u32) -> Result<RgbImage, PanoramaError> {
    match (side.checked_mul(cols), side.checked_mul(rows)) {
        (Some(width), Some(height)) => Ok(new_canvas(width, height)),
        _ => Err(PanoramaError::InvalidState(format!(
            "{}x{} faces of {}px exceed image bounds",
            cols, rows, side
        ))),
    }
}

fn compose_row(faces: &[RgbImage; 6], side: u32) -> Result<RgbImage, PanoramaError> {
    let mut canvas = face_grid(side, 6, 1)?;
    for (i, face) in faces.iter().enumerate() {
        paste(&mut canvas, face, i as u32 * side, 0);
    }
    Ok(canvas)
}

fn compose_net(faces: &[RgbImage; 6], side: u32) -> Result<RgbImage, PanoramaError> {
    let mut canvas = face_grid(side, 4, 3)?;
    for face in CubemapFace::ALL {
        let (col, row) = net_cell(face);
        paste(&mut canvas, &faces[face.index()], col * side, row * side);
    }
    Ok(canvas)
}

/// (column, row) of a face in the unfolded-cube layout.
fn net_cell(face: CubemapFace) -> (u32, u32) {
    match face {
        CubemapFace::Left => (0, 1),
        CubemapFace::Front => (1, 1),
        CubemapFace::Right => (2, 1),
        CubemapFace::Back => (3, 1),
        CubemapFace::Top => (1, 0),
        CubemapFace::Bottom => (1, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn colored_faces(side: u32) -> [RgbImage; 6] {
        CubemapFace::ALL.map(|face| {
            let shade = 40 * (face.index() as u8 + 1);
            RgbImage::from_pixel(side, side, Rgb([shade, shade, shade]))
        })
    }

    fn shade_of(face: CubemapFace) -> Rgb<u8> {
        let shade = 40 * (face.index() as u8 + 1);
        Rgb([shade, shade, shade])
    }

    #[test]
    fn test_face_ids() {
        let ids: Vec<u8> = CubemapFace::ALL.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_stitching_method_parse() {
        assert_eq!("ROW".parse(), Ok(CubemapStitchingMethod::Row));
        assert_eq!("net".parse(), Ok(CubemapStitchingMethod::Net));
        assert_eq!("none".parse(), Ok(CubemapStitchingMethod::None));
        assert!("cross".parse::<CubemapStitchingMethod>().is_err());
    }

    #[test]
    fn test_default_is_row() {
        assert_eq!(CubemapStitchingMethod::default(), CubemapStitchingMethod::Row);
    }

    #[test]
    fn test_none_returns_faces_untouched() {
        let output = compose_cubemap(colored_faces(2), 2, CubemapStitchingMethod::None).unwrap();
        match output {
            StitchedOutput::Faces(faces) => {
                assert_eq!(faces.len(), 6);
                assert_eq!(*faces[3].get_pixel(0, 0), shade_of(CubemapFace::Left));
            }
            StitchedOutput::Image(_) => panic!("Expected separate faces"),
        }
    }

    #[test]
    fn test_row_layout() {
        let output = compose_cubemap(colored_faces(2), 2, CubemapStitchingMethod::Row).unwrap();
        let image = output.into_image().unwrap();

        assert_eq!(image.dimensions(), (12, 2));
        for face in CubemapFace::ALL {
            let x = face.index() as u32 * 2;
            assert_eq!(*image.get_pixel(x + 1, 1), shade_of(face));
        }
    }

    #[test]
    fn test_net_layout() {
        let output = compose_cubemap(colored_faces(2), 2, CubemapStitchingMethod::Net).unwrap();
        let image = output.into_image().unwrap();

        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(*image.get_pixel(0, 2), shade_of(CubemapFace::Left));
        assert_eq!(*image.get_pixel(2, 2), shade_of(CubemapFace::Front));
        assert_eq!(*image.get_pixel(4, 2), shade_of(CubemapFace::Right));
        assert_eq!(*image.get_pixel(6, 2), shade_of(CubemapFace::Back));
        assert_eq!(*image.get_pixel(2, 0), shade_of(CubemapFace::Top));
        assert_eq!(*image.get_pixel(2, 4), shade_of(CubemapFace::Bottom));
        // Corners of the net stay empty
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(7, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_oversized_layout_is_rejected() {
        for (method, side) in [
            (CubemapStitchingMethod::Row, u32::MAX / 4),
            (CubemapStitchingMethod::Net, u32::MAX / 3),
        ] {
            assert!(matches!(
                compose_cubemap(colored_faces(1), side, method),
                Err(PanoramaError::InvalidState(_))
            ));
        }
        // Separate faces are never laid out
        assert!(compose_cubemap(colored_faces(1), u32::MAX, CubemapStitchingMethod::None).is_ok());
    }
}
