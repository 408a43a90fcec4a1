//! Extension protocol and registry
//!
//! Extensions attach jurisdiction-specific behaviour to a book without the
//! core knowing about it. An extension sets itself up in `apply` (creating
//! accounts, registering classifiers) and may observe verification and
//! fiscal year creation through optional hooks.
//!
//! # Example
//!
//! ```rust,ignore
//! struct Vat;
//!
//! impl Extension for Vat {
//!     fn name(&self) -> &str { "Vat" }
//!
//!     fn apply(&self, book: &mut Book) -> Result<(), BookError> {
//!         book.create_account(2640, "Ingående moms")?;
//!         book.add_classifier("vat", |a: &Account| a.in_series(2600, 2699))
//!     }
//!
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! book.use_extension(Vat)?;
//! ```

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::book::Book;
use crate::error::BookError;
use crate::fiscal_year::FiscalYear;
use crate::verification::Verification;

/// A named plugin with lifecycle hooks
///
/// Every hook except `apply` defaults to a no-op. Hooks run synchronously
/// in registration order, so an extension sees the changes made by the
/// extensions registered before it.
pub trait Extension: Any {
    /// Unique name within a book
    fn name(&self) -> &str;

    /// Sets the extension up on `book`
    ///
    /// Called once, right after the name has been registered.
    fn apply(&self, book: &mut Book) -> Result<(), BookError>;

    /// Observes a freshly numbered verification before it is handed back
    ///
    /// `args` are the extra positional arguments the caller passed to
    /// `Book::create_verification_with`.
    fn create_verification(
        &self,
        _verification: &mut Verification,
        _args: &[Value],
    ) -> Result<(), BookError> {
        Ok(())
    }

    /// Observes a fiscal year before it is inserted into the chain
    fn create_fiscal_year(
        &self,
        _fiscal_year: &mut FiscalYear,
        _args: &[Value],
    ) -> Result<(), BookError> {
        Ok(())
    }

    /// Extension specific consistency findings
    fn doctor(&self, _book: &Book) -> Vec<String> {
        Vec::new()
    }

    /// Access to the concrete type for `Book::get_extension_as`
    fn as_any(&self) -> &dyn Any;
}

struct Registration {
    name: String,
    extension: Rc<dyn Extension>,
}

/// Extensions of one book in registration order
#[derive(Default)]
pub(crate) struct ExtensionRegistry {
    registrations: Vec<Registration>,
}

impl ExtensionRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.registrations.iter().any(|r| r.name == name)
    }

    /// Stores `extension` under its name, ahead of its `apply`
    pub fn register(&mut self, extension: Rc<dyn Extension>) -> Result<(), BookError> {
        let name = extension.name().to_string();
        if self.contains(&name) {
            return Err(BookError::DuplicateExtension(name));
        }
        self.registrations.push(Registration { name, extension });
        Ok(())
    }

    /// Drops a registration whose `apply` failed
    pub fn release(&mut self, name: &str) {
        self.registrations.retain(|r| r.name != name);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Extension> {
        self.registrations
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.extension.as_ref())
    }

    /// Registered extensions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Extension> {
        self.registrations.iter().map(|r| r.extension.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.name.as_str())
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Extension for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn apply(&self, _book: &mut Book) -> Result<(), BookError> {
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ExtensionRegistry::default();
        registry.register(Rc::new(Named("A"))).unwrap();
        assert_eq!(
            registry.register(Rc::new(Named("A"))),
            Err(BookError::DuplicateExtension("A".to_string()))
        );
    }

    #[test]
    fn test_registered_extension_is_retrievable() {
        let mut registry = ExtensionRegistry::default();
        registry.register(Rc::new(Named("A"))).unwrap();
        assert!(registry.contains("A"));
        assert_eq!(registry.get("A").map(|e| e.name()), Some("A"));
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut registry = ExtensionRegistry::default();
        for name in ["B", "A", "C"] {
            registry.register(Rc::new(Named(name))).unwrap();
        }
        let names: Vec<&str> = registry.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_release_forgets_name() {
        let mut registry = ExtensionRegistry::default();
        registry.register(Rc::new(Named("A"))).unwrap();
        registry.release("A");
        assert!(!registry.contains("A"));
        assert!(registry.get("A").is_none());
    }
}
