//! Review submission model: rating, facility tags, photos.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Maximum number of photos attached to a single review.
pub const MAX_REVIEW_PHOTOS: usize = 5;

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating, validating the 1–5 range.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidReview`] when the value is 0 or above 5.
    pub fn new(value: u8) -> Result<Self, ClientError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClientError::InvalidReview(format!(
                "rating must be between 1 and 5, got {value}"
            )))
        }
    }

    /// Returns the rating value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a facility tag in the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(u16);

impl FacilityId {
    /// Creates a facility id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A facility tag a venue can be rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facility {
    /// Catalog identifier sent to the backend.
    pub id: FacilityId,
    /// Display name, also used to match facilities reported by the backend.
    pub name: &'static str,
}

/// Static facility catalog. Ids must stay in sync with the backend.
pub const FACILITIES: &[Facility] = &[
    Facility { id: FacilityId::new(1), name: "Wheelchair ramp" },
    Facility { id: FacilityId::new(2), name: "Accessible toilet" },
    Facility { id: FacilityId::new(3), name: "Elevator" },
    Facility { id: FacilityId::new(4), name: "Guiding block" },
    Facility { id: FacilityId::new(5), name: "Braille signage" },
    Facility { id: FacilityId::new(6), name: "Accessible parking" },
    Facility { id: FacilityId::new(7), name: "Low service counter" },
    Facility { id: FacilityId::new(8), name: "Sign language staff" },
];

/// Looks up a facility id by its display name.
///
/// Used to pre-select the facilities a venue already reports: the backend
/// sends facility names, the review payload wants catalog ids. Unknown
/// names return `None` and are skipped by callers.
#[must_use]
pub fn facility_id_by_name(name: &str) -> Option<FacilityId> {
    FACILITIES.iter().find(|f| f.name == name).map(|f| f.id)
}

/// A photo attached to a review.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    /// Original file name, forwarded as the multipart part's filename.
    pub file_name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A review being composed for a place, validated before submission.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    /// Identifier of the place being reviewed.
    pub place_id: String,
    /// Star rating; required before submission.
    pub rating: Option<Rating>,
    /// Free-text review body. May be empty.
    pub comment: String,
    /// Selected facility tags.
    pub facilities: Vec<FacilityId>,
    /// Attached photos, at most [`MAX_REVIEW_PHOTOS`].
    pub photos: Vec<PhotoAttachment>,
}

impl ReviewDraft {
    /// Validates the draft's submission preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidReview`] when the place id is missing,
    /// no rating was given, or more than [`MAX_REVIEW_PHOTOS`] photos are
    /// attached.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.place_id.is_empty() {
            return Err(ClientError::InvalidReview(
                "place id is required".to_string(),
            ));
        }
        if self.rating.is_none() {
            return Err(ClientError::InvalidReview(
                "a rating is required".to_string(),
            ));
        }
        if self.photos.len() > MAX_REVIEW_PHOTOS {
            return Err(ClientError::InvalidReview(format!(
                "at most {MAX_REVIEW_PHOTOS} photos may be attached"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn photo() -> PhotoAttachment {
        PhotoAttachment {
            file_name: "p.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        }
    }

    fn valid_draft() -> ReviewDraft {
        let Ok(rating) = Rating::new(4) else {
            panic!("rating 4 should be valid");
        };
        ReviewDraft {
            place_id: "place-1".to_string(),
            rating: Some(rating),
            comment: "nice".to_string(),
            facilities: vec![FacilityId::new(1)],
            photos: vec![photo()],
        }
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn facility_lookup_by_name() {
        assert_eq!(
            facility_id_by_name("Elevator"),
            Some(FacilityId::new(3))
        );
        assert_eq!(facility_id_by_name("Helipad"), None);
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn draft_requires_place_id_and_rating() {
        let mut draft = valid_draft();
        draft.place_id.clear();
        assert!(draft.validate().is_err());

        let mut draft = valid_draft();
        draft.rating = None;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn draft_enforces_photo_cap() {
        let mut draft = valid_draft();
        draft.photos = (0..=MAX_REVIEW_PHOTOS).map(|_| photo()).collect();
        assert!(draft.validate().is_err());

        draft.photos.truncate(MAX_REVIEW_PHOTOS);
        assert!(draft.validate().is_ok());
    }
}
