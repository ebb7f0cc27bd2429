//! Age ratings attached to creative islands
//!
//! Each rating board is keyed by the authority that issued it, and the rating
//! values on a board must come from that authority's closed set.

use serde::Serialize;

use super::enums::wire_enum;
use super::error::{ValidationError, ValidationErrorKind, ValidationResult};

wire_enum! {
    /// Organisation that issued a rating board
    RatingAuthority {
        Acb => "ACB",
        Pegi => "PEGI",
        Generic => "Generic",
        ClassInd => "ClassInd",
        Usk => "USK",
        Grac => "GRAC",
        Esrb => "ESRB",
        Russia => "Russia",
        Cero => "CERO",
    }
}

wire_enum! {
    AcbRating {
        R18 => "ACB_AGE_R18",
        Ma15 => "ACB_AGE_MA15",
        M => "ACB_AGE_M",
        Pg => "ACB_AGE_PG",
        G => "ACB_AGE_G",
        NotApplicable => "ACB_AGE_NA",
    }
}

wire_enum! {
    PegiRating {
        Age18 => "PEGI_AGE_18",
        Age16 => "PEGI_AGE_16",
        Age12 => "PEGI_AGE_12",
        Age7 => "PEGI_AGE_7",
        Age3 => "PEGI_AGE_3",
        Pg => "PEGI_AGE_PG",
    }
}

wire_enum! {
    GenericRating {
        Age12 => "GEN_AGE_12",
        Age7 => "GEN_AGE_7",
        Age3 => "GEN_AGE_3",
    }
}

wire_enum! {
    /// Brazilian advisory rating
    ClassIndRating {
        Age14 => "CLASSIND_AGE_14",
        Age12 => "CLASSIND_AGE_12",
        Age10 => "CLASSIND_AGE_10",
        Livre => "CLASSIND_AGE_LIVRE",
    }
}

wire_enum! {
    UskRating {
        Age18 => "USK_AGE_18",
        Age16 => "USK_AGE_16",
        Age12 => "USK_AGE_12",
        Age6 => "USK_AGE_6",
        Age0 => "USK_AGE_0",
    }
}

wire_enum! {
    /// Korean rating
    GracRating {
        Age15 => "GRAC_AGE_15",
        Age12 => "GRAC_AGE_12",
        RatingCancelled => "GRAC_AGE_RC",
        All => "GRAC_AGE_ALL",
        NotApplicable => "GRAC_AGE_NA",
    }
}

wire_enum! {
    EsrbRating {
        Mature => "ESRB_AGE_M",
        Teen => "ESRB_AGE_T",
        Everyone10 => "ESRB_AGE_E10",
        Everyone => "ESRB_AGE_E",
    }
}

wire_enum! {
    RussiaRating {
        Age18 => "RUSSIA_AGE_18",
        Age16 => "RUSSIA_AGE_16",
        Age12 => "RUSSIA_AGE_12",
        Age6 => "RUSSIA_AGE_6",
        Age0 => "RUSSIA_AGE_0",
    }
}

wire_enum! {
    /// Japanese rating
    CeroRating {
        Age0 => "CERO_AGE_0",
        Age15 => "CERO_AGE_15",
    }
}

/// A rating issued by one specific authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AgeRating {
    Acb(AcbRating),
    Pegi(PegiRating),
    Generic(GenericRating),
    ClassInd(ClassIndRating),
    Usk(UskRating),
    Grac(GracRating),
    Esrb(EsrbRating),
    Russia(RussiaRating),
    Cero(CeroRating),
}

impl AgeRating {
    /// Parse a rating value issued by `authority`
    pub fn parse(authority: RatingAuthority, value: &str) -> ValidationResult<Self> {
        let parsed = match authority {
            RatingAuthority::Acb => AcbRating::parse(value).map(AgeRating::Acb),
            RatingAuthority::Pegi => PegiRating::parse(value).map(AgeRating::Pegi),
            RatingAuthority::Generic => GenericRating::parse(value).map(AgeRating::Generic),
            RatingAuthority::ClassInd => ClassIndRating::parse(value).map(AgeRating::ClassInd),
            RatingAuthority::Usk => UskRating::parse(value).map(AgeRating::Usk),
            RatingAuthority::Grac => GracRating::parse(value).map(AgeRating::Grac),
            RatingAuthority::Esrb => EsrbRating::parse(value).map(AgeRating::Esrb),
            RatingAuthority::Russia => RussiaRating::parse(value).map(AgeRating::Russia),
            RatingAuthority::Cero => CeroRating::parse(value).map(AgeRating::Cero),
        };

        parsed.map_err(|e| {
            ValidationError::with_context(
                ValidationErrorKind::InvalidRating,
                "rating",
                format!("{} for authority {}: {}", value, authority, e.kind),
            )
        })
    }

    /// The authority that issued this rating
    pub fn authority(&self) -> RatingAuthority {
        match self {
            AgeRating::Acb(_) => RatingAuthority::Acb,
            AgeRating::Pegi(_) => RatingAuthority::Pegi,
            AgeRating::Generic(_) => RatingAuthority::Generic,
            AgeRating::ClassInd(_) => RatingAuthority::ClassInd,
            AgeRating::Usk(_) => RatingAuthority::Usk,
            AgeRating::Grac(_) => RatingAuthority::Grac,
            AgeRating::Esrb(_) => RatingAuthority::Esrb,
            AgeRating::Russia(_) => RatingAuthority::Russia,
            AgeRating::Cero(_) => RatingAuthority::Cero,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRating::Acb(r) => r.as_str(),
            AgeRating::Pegi(r) => r.as_str(),
            AgeRating::Generic(r) => r.as_str(),
            AgeRating::ClassInd(r) => r.as_str(),
            AgeRating::Usk(r) => r.as_str(),
            AgeRating::Grac(r) => r.as_str(),
            AgeRating::Esrb(r) => r.as_str(),
            AgeRating::Russia(r) => r.as_str(),
            AgeRating::Cero(r) => r.as_str(),
        }
    }
}

impl std::fmt::Display for AgeRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Look up the authority named by a rating board key
pub fn authority_for_board(name: &str) -> ValidationResult<RatingAuthority> {
    RatingAuthority::parse(name).map_err(|_| {
        ValidationError::with_context(
            ValidationErrorKind::UnknownRatingAuthority,
            "boards",
            format!("No rating authority named {:?}", name),
        )
    })
}
