// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration-time checks shared by every registry.
//!
//! [`check_unique`] applies the [`DuplicateIdHandling`] policy; it never
//! mutates anything itself. Under `Warn` and `Ignore` the caller goes on to
//! overwrite the existing entry.

use datokit_core::{DuplicateIdHandling, KitError};

/// Applies the duplicate-ID policy to `id` against the IDs already registered.
///
/// Only `Throw` can fail. `Warn` emits exactly one warning per duplicate.
pub fn check_unique<I>(
    id: &str,
    existing: I,
    entity: &str,
    mode: DuplicateIdHandling,
) -> Result<(), KitError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if !existing.into_iter().any(|known| known.as_ref() == id) {
        return Ok(());
    }

    match mode {
        DuplicateIdHandling::Throw => Err(KitError::DuplicateId {
            entity: entity.to_string(),
            id: id.to_string(),
        }),
        DuplicateIdHandling::Warn => {
            tracing::warn!(
                entity,
                id,
                "{entity} with id \"{id}\" is already registered, replacing it"
            );
            Ok(())
        }
        DuplicateIdHandling::Ignore => Ok(()),
    }
}

/// Applies the duplicate policy to a singleton that may be set only once.
pub fn check_reconfigure(
    configured: bool,
    what: &'static str,
    mode: DuplicateIdHandling,
) -> Result<(), KitError> {
    if !configured {
        return Ok(());
    }

    match mode {
        DuplicateIdHandling::Throw => Err(KitError::AlreadyConfigured { what }),
        DuplicateIdHandling::Warn => {
            tracing::warn!(what, "{what} is already configured, replacing it");
            Ok(())
        }
        DuplicateIdHandling::Ignore => Ok(()),
    }
}

/// Rejects an empty (or whitespace-only) required string.
pub fn require_field(
    value: &str,
    field: &'static str,
    entity: &'static str,
) -> Result<(), KitError> {
    if value.trim().is_empty() {
        return Err(KitError::MissingField { entity, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn fresh_id_passes_in_every_mode() {
        for mode in [
            DuplicateIdHandling::Throw,
            DuplicateIdHandling::Warn,
            DuplicateIdHandling::Ignore,
        ] {
            assert!(check_unique("new", ["a", "b"], "Page", mode).is_ok());
        }
    }

    #[test]
    fn throw_rejects_duplicate() {
        let err = check_unique("a", ["a"], "Modal", DuplicateIdHandling::Throw).unwrap_err();
        assert_eq!(err.to_string(), "Modal with id \"a\" is already registered");
    }

    #[test]
    #[traced_test]
    fn warn_logs_once_and_passes() {
        let existing = vec!["dup".to_string()];
        assert!(check_unique("dup", &existing, "Sidebar", DuplicateIdHandling::Warn).is_ok());
        assert!(logs_contain("Sidebar with id \"dup\" is already registered"));
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|l| l.contains("already registered")).count() {
                1 => Ok(()),
                n => Err(format!("expected one warning, saw {n}")),
            }
        });
    }

    #[test]
    #[traced_test]
    fn ignore_is_silent() {
        assert!(check_unique("dup", ["dup"], "Sidebar", DuplicateIdHandling::Ignore).is_ok());
        assert!(!logs_contain("already registered"));
    }

    #[test]
    fn reconfigure_under_throw_fails() {
        assert!(check_reconfigure(false, "Config screen", DuplicateIdHandling::Throw).is_ok());
        let err =
            check_reconfigure(true, "Config screen", DuplicateIdHandling::Throw).unwrap_err();
        assert_eq!(err.to_string(), "Config screen is already configured");
    }

    #[test]
    fn require_field_rejects_blank() {
        assert!(require_field("page-1", "page_id", "Page").is_ok());
        let err = require_field("  ", "page_id", "Page").unwrap_err();
        assert!(matches!(
            err,
            KitError::MissingField {
                entity: "Page",
                field: "page_id"
            }
        ));
    }
}
