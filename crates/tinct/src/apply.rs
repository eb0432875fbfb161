//! Writing token values onto a style scope.
//!
//! Each token is transformed according to its [`TokenKind`] before being
//! written to its style variable. After the direct writes, declared
//! inheritance pairs fill any variant token the theme left unset with its
//! parent's resolved value.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::host::StyleScope;
use crate::theme::TokenValue;
use crate::tokens::{self, INHERITANCE, TOKENS, TokenKind};

/// Written for `position` tokens with no usable value.
pub const DEFAULT_POSITION: &str = "center center";
/// Written for `image` tokens with no usable value.
pub const NO_IMAGE: &str = "none";

/// Options for [`apply_to_scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyOptions {
    /// Remove every known token variable before writing.
    pub clear_first: bool,
}

impl ApplyOptions {
    pub fn clearing() -> Self {
        Self { clear_first: true }
    }
}

/// What an application pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Variables written from the theme's own values.
    pub set: usize,
    /// Variables removed before writing.
    pub cleared: usize,
    /// Variables filled from a parent token.
    pub inherited: usize,
    /// Values that could not be converted, or keys not in the registry.
    pub skipped: usize,
}

/// Apply raw token values to `scope`.
pub fn apply_to_scope(
    scope: &mut dyn StyleScope,
    colors: &BTreeMap<String, TokenValue>,
    options: ApplyOptions,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    if options.clear_first {
        for def in TOKENS {
            scope.remove_var(def.var);
        }
        report.cleared = TOKENS.len();
    }

    for key in colors.keys() {
        if tokens::lookup(key).is_none() {
            trace!(token.key = %key, "Ignoring unknown token");
            report.skipped += 1;
        }
    }

    let mut resolved: HashMap<&'static str, String> = HashMap::new();
    for def in TOKENS {
        let raw = colors.get(def.key);
        match resolve_value(def.kind, raw) {
            Some(value) => {
                scope.set_var(def.var, &value);
                resolved.insert(def.key, value);
                report.set += 1;
            }
            None if raw.is_some_and(|v| !v.is_null()) => {
                debug!(token.key = %def.key, token.kind = ?def.kind, "Token value not convertible");
                report.skipped += 1;
            }
            None => {}
        }
    }

    for &(child, parent) in INHERITANCE {
        if colors.get(child).is_some_and(|v| !v.is_null()) {
            continue;
        }
        let Some(value) = resolved.get(parent).cloned() else {
            continue;
        };
        if let Some(var) = tokens::var_name(child) {
            scope.set_var(var, &value);
            resolved.insert(child, value);
            report.inherited += 1;
        }
    }

    debug!(
        apply.set = report.set,
        apply.cleared = report.cleared,
        apply.inherited = report.inherited,
        apply.skipped = report.skipped,
        "Tokens applied"
    );
    report
}

/// Transform one raw value into its style value.
///
/// `None` means nothing should be written. Position and image tokens always
/// produce a value.
pub fn resolve_value(kind: TokenKind, raw: Option<&TokenValue>) -> Option<String> {
    match kind {
        TokenKind::Color | TokenKind::Raw => raw.and_then(TokenValue::as_text).map(|t| t.into_owned()),
        TokenKind::Opacity => raw
            .and_then(TokenValue::as_f64)
            .map(|pct| format_decimal(pct.clamp(0.0, 100.0) / 100.0)),
        TokenKind::Blur => raw
            .and_then(TokenValue::as_f64)
            .map(|px| format!("{}px", px.round() as i64)),
        TokenKind::Position => Some(match raw.filter(|v| !v.is_falsy()).and_then(TokenValue::as_text) {
            Some(position) => position.into_owned(),
            None => DEFAULT_POSITION.to_string(),
        }),
        TokenKind::Image => Some(match raw.filter(|v| !v.is_falsy()).and_then(TokenValue::as_text) {
            Some(reference) => image_reference(&reference),
            None => NO_IMAGE.to_string(),
        }),
    }
}

fn format_decimal(value: f64) -> String {
    // f64 Display already yields the shortest round-trip form ("0.8", "1").
    format!("{value}")
}

/// Wrap a path or data reference in `url(...)`.
///
/// Data references are single-quoted as-is; file paths are double-quoted
/// with `\` and `"` escaped. Values already in `url(...)` form and the
/// literal `none` pass through.
pub fn image_reference(reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() || reference == NO_IMAGE {
        return NO_IMAGE.to_string();
    }
    if reference.starts_with("url(") {
        return reference.to_string();
    }
    if reference.starts_with("data:") {
        return format!("url('{reference}')");
    }
    let escaped = reference.replace('\\', "\\\\").replace('"', "\\\"");
    format!("url(\"{escaped}\")")
}
