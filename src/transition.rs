//! Crossfade transitions understood by ffmpeg's `xfade` filter

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Transition names accepted by `xfade=transition=...`
pub const SUPPORTED_TRANSITIONS: &[&str] = &[
    "fade",
    "wipeleft",
    "wiperight",
    "wipeup",
    "wipedown",
    "slideleft",
    "slideright",
    "slideup",
    "slidedown",
    "circlecrop",
    "rectcrop",
    "distance",
    "fadeblack",
    "fadewhite",
    "radial",
    "smoothleft",
    "smoothright",
    "smoothup",
    "smoothdown",
    "circleopen",
    "circleclose",
    "vertopen",
    "vertclose",
    "horzopen",
    "horzclose",
    "dissolve",
    "pixelize",
    "diagtl",
    "diagtr",
    "diagbl",
    "diagbr",
    "hlslice",
    "hrslice",
    "vuslice",
    "vdslice",
    "hblur",
    "fadegrays",
    "wipetl",
    "wipetr",
    "wipebl",
    "wipebr",
    "squeezeh",
    "squeezev",
    "zoomin",
    "fadefast",
    "fadeslow",
    "hlwind",
    "hrwind",
    "vuwind",
    "vdwind",
    "coverleft",
    "coverright",
    "coverup",
    "coverdown",
    "revealleft",
    "revealright",
    "revealup",
    "revealdown",
];

/// A validated crossfade transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition(&'static str);

impl Transition {
    /// Plain opacity blend, the encoder's default
    pub const FADE: Transition = Transition("fade");

    /// Name as passed to the encoder
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::FADE
    }
}

impl FromStr for Transition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        SUPPORTED_TRANSITIONS
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(wanted))
            .map(Transition)
            .ok_or_else(|| Error::UnsupportedTransition(s.to_string()))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_known() {
        let t: Transition = "circlecrop".parse().unwrap();
        assert_eq!(t.as_str(), "circlecrop");
        assert_eq!("WipeLeft".parse::<Transition>().unwrap().as_str(), "wipeleft");
        assert_eq!(Transition::default(), Transition::FADE);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bogus".parse::<Transition>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedTransition);
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names = SUPPORTED_TRANSITIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SUPPORTED_TRANSITIONS.len());
    }
}
