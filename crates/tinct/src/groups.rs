//! Color groups.
//!
//! A group expands one base color into a fixed set of dependent tokens. The
//! percentages below are part of the output contract: previews and stored
//! palettes depend on them producing identical hex strings for a given base.

use crate::color;
use crate::error::DeriveError;

/// How a member token is computed from the group's base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Lighten dark bases, darken light ones.
    Shift(f64),
    Lighten(f64),
    Darken(f64),
    Desaturate(f64),
    /// Darken, then desaturate the result.
    DarkenDesaturate(f64, f64),
    /// Alpha-compose at the given 0–1 opacity.
    Alpha(f64),
}

impl Rule {
    /// Apply this rule to a base color.
    pub fn apply(self, base: &str) -> String {
        match self {
            Rule::Shift(pct) => color::shift(base, pct),
            Rule::Lighten(pct) => color::lighten(base, pct),
            Rule::Darken(pct) => color::darken(base, pct),
            Rule::Desaturate(pct) => color::desaturate(base, pct),
            Rule::DarkenDesaturate(dark, desat) => {
                color::desaturate(&color::darken(base, dark), desat)
            }
            Rule::Alpha(alpha) => color::to_alpha(base, alpha),
        }
    }
}

/// A member token and the rule that derives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivation {
    pub key: &'static str,
    pub rule: Rule,
}

/// A base token plus the ordered tokens derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub base: &'static str,
    pub derivations: &'static [Derivation],
}

impl ColorGroup {
    /// Member token keys in derivation order.
    pub fn members(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.derivations.iter().map(|d| d.key)
    }

    /// Derive every member from `base`.
    ///
    /// # Errors
    /// Returns [`DeriveError::InvalidBase`] if `base` is not a hex color.
    pub fn derive(&self, base: &str) -> Result<Vec<(&'static str, String)>, DeriveError> {
        if color::parse(base).is_none() {
            return Err(DeriveError::InvalidBase(base.to_string()));
        }
        Ok(self
            .derivations
            .iter()
            .map(|d| (d.key, d.rule.apply(base)))
            .collect())
    }
}

const fn derive(key: &'static str, rule: Rule) -> Derivation {
    Derivation { key, rule }
}

/// All color groups.
pub static GROUPS: &[ColorGroup] = &[
    ColorGroup {
        id: "background",
        label: "Background",
        base: "bg-primary",
        derivations: &[
            derive("bg-secondary", Rule::Shift(5.0)),
            derive("bg-tertiary", Rule::Shift(10.0)),
            derive("bg-hover", Rule::Shift(15.0)),
            derive("bg-overlay", Rule::Alpha(0.8)),
        ],
    },
    ColorGroup {
        id: "text",
        label: "Text",
        base: "text-primary",
        derivations: &[
            derive("text-secondary", Rule::DarkenDesaturate(20.0, 10.0)),
            derive("text-muted", Rule::DarkenDesaturate(40.0, 30.0)),
        ],
    },
    ColorGroup {
        id: "accent",
        label: "Accent",
        base: "accent",
        derivations: &[
            derive("accent-hover", Rule::Lighten(10.0)),
            derive("accent-active", Rule::Darken(10.0)),
            derive("accent-subtle", Rule::Desaturate(30.0)),
            derive("accent-muted", Rule::Alpha(0.15)),
        ],
    },
    ColorGroup {
        id: "border",
        label: "Border",
        base: "border",
        derivations: &[
            derive("border-subtle", Rule::Darken(8.0)),
            derive("border-strong", Rule::Lighten(20.0)),
        ],
    },
];

/// Look up a group by id.
pub fn group(id: &str) -> Option<&'static ColorGroup> {
    GROUPS.iter().find(|g| g.id == id)
}

/// Derive the members of group `id` from `base`.
///
/// # Errors
/// Returns [`DeriveError`] for an unknown group or a malformed base.
pub fn derive_group(id: &str, base: &str) -> Result<Vec<(&'static str, String)>, DeriveError> {
    group(id)
        .ok_or_else(|| DeriveError::UnknownGroup(id.to_string()))?
        .derive(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens;

    #[test]
    fn group_members_are_registered_in_their_group() {
        for g in GROUPS {
            assert_eq!(tokens::lookup(g.base).and_then(|d| d.group), Some(g.id));
            for key in g.members() {
                let def = tokens::lookup(key).expect("member registered");
                assert_eq!(def.group, Some(g.id), "{key}");
            }
        }
    }

    #[test]
    fn text_group_from_black() {
        let derived = derive_group("text", "#000000").unwrap();
        assert_eq!(
            derived,
            vec![
                ("text-secondary", "#000000".to_string()),
                ("text-muted", "#000000".to_string()),
            ]
        );
    }

    #[test]
    fn text_group_from_white_and_red() {
        let white = derive_group("text", "#ffffff").unwrap();
        assert_eq!(white[0].1, "#cccccc");
        assert_eq!(white[1].1, "#999999");

        let red = derive_group("text", "#ff0000").unwrap();
        assert_eq!(red[0].1, "#be0606");
    }

    #[test]
    fn background_group_shifts_toward_contrast() {
        let dark = derive_group("background", "#282a36").unwrap();
        assert_eq!(dark[0], ("bg-secondary", "#333540".to_string()));
        assert_eq!(dark[3], ("bg-overlay", "rgba(40, 42, 54, 0.8)".to_string()));

        let light = derive_group("background", "#ffffff").unwrap();
        assert_eq!(light[1], ("bg-tertiary", "#e6e6e6".to_string()));
    }

    #[test]
    fn accent_group() {
        let accent = derive_group("accent", "#000000").unwrap();
        assert_eq!(accent[0].1, "#1a1a1a");
        assert_eq!(accent[1].1, "#000000");
        assert_eq!(accent[3].1, "rgba(0, 0, 0, 0.15)");
    }

    #[test]
    fn errors() {
        assert_eq!(
            derive_group("shadow", "#000000"),
            Err(DeriveError::UnknownGroup("shadow".into()))
        );
        assert_eq!(
            derive_group("text", "black"),
            Err(DeriveError::InvalidBase("black".into()))
        );
    }
}
