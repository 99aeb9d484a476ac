//! Loading a cube from its 54 sticker colours.
//!
//! The string lists facelets face by face. Each cubie location is a fixed
//! pair or triple of facelet indices, and the colours found there identify
//! the cubie sitting at that location along with its orientation.

use crate::state::{
    CORNER_COUNT, CORNER_ORIENTATIONS, CUBIE_COUNT, CubeState, EDGE_ORIENTATIONS, StateError,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const FACELET_COUNT: usize = 54;

/// The facelet string of the solved cube.
pub const SOLVED_FACELETS: &str = "RRRRRRRRRGGGYYYBBBGGGYYYBBBGGGYYYBBBOOOOOOOOOWWWWWWWWW";

/// Facelet indices of every cubie location, corners first.
const LOCATIONS: [&[usize]; CUBIE_COUNT] = [
    &[12, 11, 6],
    &[14, 15, 8],
    &[32, 33, 38],
    &[30, 29, 36],
    &[45, 27, 42],
    &[47, 35, 44],
    &[53, 17, 2],
    &[51, 9, 0],
    &[13, 7],
    &[16, 5],
    &[52, 1],
    &[10, 3],
    &[21, 20],
    &[28, 39],
    &[48, 18],
    &[46, 43],
    &[50, 26],
    &[34, 41],
    &[31, 37],
    &[23, 24],
];

/// Colours read at a location, to the cubie they belong to and its
/// orientation there.
static CUBIES: phf::Map<&'static str, (u8, u8)> = phf::phf_map! {
    "YGR" => (0, 0), "YRG" => (0, 0), "GRY" => (0, 1), "GYR" => (0, 1), "RYG" => (0, 2), "RGY" => (0, 2),
    "YRB" => (1, 0), "YBR" => (1, 0), "RBY" => (1, 1), "RYB" => (1, 1), "BYR" => (1, 2), "BRY" => (1, 2),
    "YBO" => (2, 0), "YOB" => (2, 0), "BOY" => (2, 1), "BYO" => (2, 1), "OYB" => (2, 2), "OBY" => (2, 2),
    "YOG" => (3, 0), "YGO" => (3, 0), "OGY" => (3, 1), "OYG" => (3, 1), "GYO" => (3, 2), "GOY" => (3, 2),
    "WGO" => (4, 0), "WOG" => (4, 0), "GOW" => (4, 1), "GWO" => (4, 1), "OWG" => (4, 2), "OGW" => (4, 2),
    "WBO" => (5, 0), "WOB" => (5, 0), "OBW" => (5, 1), "OWB" => (5, 1), "BWO" => (5, 2), "BOW" => (5, 2),
    "WBR" => (6, 0), "WRB" => (6, 0), "BRW" => (6, 1), "BWR" => (6, 1), "RWB" => (6, 2), "RBW" => (6, 2),
    "WGR" => (7, 0), "WRG" => (7, 0), "RGW" => (7, 1), "RWG" => (7, 1), "GWR" => (7, 2), "GRW" => (7, 2),
    "YR" => (8, 0), "RY" => (8, 1),
    "BR" => (9, 0), "RB" => (9, 1),
    "WR" => (10, 0), "RW" => (10, 1),
    "GR" => (11, 0), "RG" => (11, 1),
    "YG" => (12, 0), "GY" => (12, 1),
    "GO" => (13, 0), "OG" => (13, 1),
    "WG" => (14, 0), "GW" => (14, 1),
    "WO" => (15, 0), "OW" => (15, 1),
    "WB" => (16, 0), "BW" => (16, 1),
    "BO" => (17, 0), "OB" => (17, 1),
    "YO" => (18, 0), "OY" => (18, 1),
    "YB" => (19, 0), "BY" => (19, 1),
};

#[derive(Error, Debug)]
pub enum FaceletError {
    #[error("Expected 54 facelets, found {0}")]
    WrongLength(usize),
    #[error("No cubie is coloured `{colours}` (location {location})")]
    UnknownCubie { location: usize, colours: String },
    #[error("The cubie coloured `{colours}` appears more than once")]
    DuplicateCubie { colours: String },
    #[error(transparent)]
    InvalidState(#[from] StateError),
    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convert a facelet string into a cube. Whitespace is ignored, exactly
/// [`FACELET_COUNT`] characters must remain.
///
/// # Errors
///
/// If the length is wrong or the colours do not describe each cubie once.
pub fn parse_facelets(facelets: &str) -> Result<CubeState, FaceletError> {
    let facelets = facelets
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<Vec<_>>();
    if facelets.len() != FACELET_COUNT {
        return Err(FaceletError::WrongLength(facelets.len()));
    }

    let mut codes = [u8::MAX; CUBIE_COUNT];
    for (location, indices) in LOCATIONS.into_iter().enumerate() {
        let colours = indices.iter().map(|&i| facelets[i]).collect::<String>();
        let Some(&(cubie, orientation)) = CUBIES.get(colours.as_str()) else {
            return Err(FaceletError::UnknownCubie { location, colours });
        };
        let cubie = usize::from(cubie);
        if codes[cubie] != u8::MAX {
            return Err(FaceletError::DuplicateCubie { colours });
        }
        // Locations are numbered like cubies, so the location is the
        // position and the colours always name a cubie of the same kind
        codes[cubie] = if location < CORNER_COUNT {
            location as u8 * CORNER_ORIENTATIONS + orientation
        } else {
            (location - CORNER_COUNT) as u8 * EDGE_ORIENTATIONS + orientation
        };
    }

    Ok(CubeState::new(codes)?)
}

/// Read a facelet string from a file, joining its trimmed lines.
///
/// # Errors
///
/// If the file cannot be read or does not describe a cube.
pub fn load_facelet_file(path: &Path) -> Result<CubeState, FaceletError> {
    let contents = fs::read_to_string(path).map_err(|source| FaceletError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_facelets(&contents.lines().map(str::trim).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_facelets_load_solved() {
        assert_eq!(parse_facelets(SOLVED_FACELETS).unwrap(), CubeState::SOLVED);
    }

    #[test]
    fn every_cubie_has_one_colour_set() {
        let mut orientations = [0; CUBIE_COUNT];
        for &(cubie, _) in CUBIES.values() {
            orientations[usize::from(cubie)] += 1;
        }
        // Two spellings per orientation
        assert_eq!(&orientations[..CORNER_COUNT], [6; CORNER_COUNT]);
        assert_eq!(&orientations[CORNER_COUNT..], [2; CUBIE_COUNT - CORNER_COUNT]);
    }

    #[test]
    fn whitespace_is_ignored() {
        let spaced = SOLVED_FACELETS
            .as_bytes()
            .chunks(9)
            .map(|row| std::str::from_utf8(row).unwrap())
            .collect::<Vec<_>>()
            .join("\n  ");
        assert_eq!(parse_facelets(&spaced).unwrap(), CubeState::SOLVED);
    }

    #[test]
    fn rejects_bad_facelets() {
        assert!(matches!(
            parse_facelets(&SOLVED_FACELETS[1..]),
            Err(FaceletError::WrongLength(53))
        ));

        // Corner location 0 now reads RGR
        let mut recoloured = SOLVED_FACELETS.chars().collect::<Vec<_>>();
        recoloured[12] = 'R';
        let recoloured = recoloured.into_iter().collect::<String>();
        assert!(matches!(
            parse_facelets(&recoloured),
            Err(FaceletError::UnknownCubie { location: 0, .. })
        ));
    }
}
