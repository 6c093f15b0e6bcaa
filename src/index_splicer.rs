//! In-place replacement of marker-delimited regions of the homepage.
//!
//! The homepage is written by hand; only the text strictly between a pair of
//! markers belongs to the generator.

use crate::error::BuildError;

pub struct Region<'a> {
    pub begin: &'a str,
    pub end: &'a str,
    pub content: &'a str,
}

fn missing(marker: &str) -> BuildError {
    BuildError::MissingMarker {
        marker: marker.to_string(),
    }
}

fn splice_region(document: &str, region: &Region) -> Result<String, BuildError> {
    let begin = document.find(region.begin).ok_or_else(|| missing(region.begin))?;
    let interior_start = begin + region.begin.len();
    let interior_len = document[interior_start..]
        .find(region.end)
        .ok_or_else(|| missing(region.end))?;
    let interior_end = interior_start + interior_len;

    let mut spliced = String::with_capacity(document.len() - interior_len + region.content.len());
    spliced.push_str(&document[..interior_start]);
    spliced.push_str(region.content);
    spliced.push_str(&document[interior_end..]);
    Ok(spliced)
}

/// Replaces the interior of every region, in order. Either every region is
/// replaced or an error names the first marker that could not be found.
pub fn splice(document: &str, regions: &[Region]) -> Result<String, BuildError> {
    let mut spliced = document.to_string();
    for region in regions {
        spliced = splice_region(&spliced, region)?;
    }
    Ok(spliced)
}
