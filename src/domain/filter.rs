// SPDX-License-Identifier: MPL-2.0
//! Photo filter catalog.
//!
//! The set of filters is fixed at compile time. Each filter carries a CSS
//! filter expression describing its look; the expression drives the live
//! client-side preview while the server renders the persisted derivative.

use std::fmt;
use std::str::FromStr;

/// Identifier of a filter in the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterId {
    #[default]
    Original,
    Grayscale,
    Sepia,
    Dream,
    Romance,
    Forever,
}

impl FilterId {
    /// All filters in display order.
    pub const ALL: [FilterId; 6] = [
        FilterId::Original,
        FilterId::Grayscale,
        FilterId::Sepia,
        FilterId::Dream,
        FilterId::Romance,
        FilterId::Forever,
    ];

    /// Wire name used by the photo service and in derived identities.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterId::Original => "original",
            FilterId::Grayscale => "grayscale",
            FilterId::Sepia => "sepia",
            FilterId::Dream => "dream",
            FilterId::Romance => "romance",
            FilterId::Forever => "forever",
        }
    }

    /// Whether this is the untouched photo.
    #[must_use]
    pub fn is_original(self) -> bool {
        self == FilterId::Original
    }

    /// `original` is never sent to the server.
    #[must_use]
    pub fn is_server_applicable(self) -> bool {
        !self.is_original()
    }

    #[must_use]
    pub fn descriptor(self) -> &'static FilterDescriptor {
        // ALL and CATALOG share the same order.
        let index = FilterId::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or(0);
        &CATALOG[index]
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a catalog filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter: {}", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for FilterId {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// Static description of a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDescriptor {
    pub id: FilterId,
    /// i18n key of the label shown on the filter chip.
    pub label_key: &'static str,
    /// CSS filter expression approximating the server rendering.
    pub preview_style: &'static str,
    /// Whether the preview darkens the edges (`box-shadow: inset ...`).
    pub vignette: bool,
}

impl FilterDescriptor {
    /// Parsed preview operations, in application order.
    pub fn preview_ops(&self) -> Result<Vec<PreviewOp>, CssFilterError> {
        parse_css_filter(self.preview_style)
    }

    /// Whether the preview changes anything at all.
    #[must_use]
    pub fn has_visual_transform(&self) -> bool {
        !self.preview_style.trim().is_empty() || self.vignette
    }
}

pub static CATALOG: [FilterDescriptor; 6] = [
    FilterDescriptor {
        id: FilterId::Original,
        label_key: "filter-original",
        preview_style: "",
        vignette: false,
    },
    FilterDescriptor {
        id: FilterId::Grayscale,
        label_key: "filter-grayscale",
        preview_style: "grayscale(1)",
        vignette: false,
    },
    FilterDescriptor {
        id: FilterId::Sepia,
        label_key: "filter-sepia",
        preview_style: "sepia(0.7) contrast(1.05)",
        vignette: false,
    },
    FilterDescriptor {
        id: FilterId::Dream,
        label_key: "filter-dream",
        preview_style: "brightness(1.1) contrast(0.85) saturate(1.2) blur(0.5px)",
        vignette: false,
    },
    FilterDescriptor {
        id: FilterId::Romance,
        label_key: "filter-romance",
        preview_style:
            "brightness(1.05) contrast(0.95) saturate(1.15) sepia(0.2) hue-rotate(330deg)",
        vignette: false,
    },
    FilterDescriptor {
        id: FilterId::Forever,
        label_key: "filter-forever",
        preview_style: "contrast(1.15) brightness(1.1) saturate(1.05)",
        vignette: true,
    },
];

// =============================================================================
// CSS filter expressions
// =============================================================================

/// One function of a CSS `filter` expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewOp {
    Grayscale(f32),
    Sepia(f32),
    Saturate(f32),
    /// Rotation in degrees.
    HueRotate(f32),
    Brightness(f32),
    Contrast(f32),
    /// Gaussian radius in pixels.
    Blur(f32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssFilterError {
    UnknownFunction(String),
    InvalidArgument(String),
    Malformed(String),
}

impl fmt::Display for CssFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssFilterError::UnknownFunction(name) => write!(f, "unknown filter function: {name}"),
            CssFilterError::InvalidArgument(arg) => write!(f, "invalid filter argument: {arg}"),
            CssFilterError::Malformed(expr) => write!(f, "malformed filter expression: {expr}"),
        }
    }
}

impl std::error::Error for CssFilterError {}

/// Parses a space-separated list of CSS filter functions.
///
/// Amounts accept plain numbers or percentages; `hue-rotate` takes `deg`,
/// `blur` takes `px`.
pub fn parse_css_filter(expr: &str) -> Result<Vec<PreviewOp>, CssFilterError> {
    let mut ops = Vec::new();
    let mut rest = expr.trim();

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| CssFilterError::Malformed(expr.to_string()))?;
        let close = rest
            .find(')')
            .filter(|close| *close > open)
            .ok_or_else(|| CssFilterError::Malformed(expr.to_string()))?;

        let name = rest[..open].trim();
        let arg = rest[open + 1..close].trim();
        ops.push(parse_function(name, arg)?);

        rest = rest[close + 1..].trim_start();
    }

    Ok(ops)
}

fn parse_function(name: &str, arg: &str) -> Result<PreviewOp, CssFilterError> {
    match name {
        "grayscale" => Ok(PreviewOp::Grayscale(parse_amount(arg)?)),
        "sepia" => Ok(PreviewOp::Sepia(parse_amount(arg)?)),
        "saturate" => Ok(PreviewOp::Saturate(parse_amount(arg)?)),
        "brightness" => Ok(PreviewOp::Brightness(parse_amount(arg)?)),
        "contrast" => Ok(PreviewOp::Contrast(parse_amount(arg)?)),
        "hue-rotate" => Ok(PreviewOp::HueRotate(parse_unit(arg, "deg")?)),
        "blur" => Ok(PreviewOp::Blur(parse_unit(arg, "px")?)),
        other => Err(CssFilterError::UnknownFunction(other.to_string())),
    }
}

fn parse_amount(arg: &str) -> Result<f32, CssFilterError> {
    let value = if let Some(percent) = arg.strip_suffix('%') {
        parse_number(percent)? / 100.0
    } else {
        parse_number(arg)?
    };
    if value < 0.0 {
        return Err(CssFilterError::InvalidArgument(arg.to_string()));
    }
    Ok(value)
}

fn parse_unit(arg: &str, unit: &str) -> Result<f32, CssFilterError> {
    let number = arg.strip_suffix(unit).unwrap_or(arg);
    parse_number(number)
}

fn parse_number(raw: &str) -> Result<f32, CssFilterError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CssFilterError::InvalidArgument(raw.to_string()))
}
