//! Void methods that can be invoked from the sheet.

/// A method the resolver knows how to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidMethod {
    /// Adds Awareness or Intellect, chosen by the user.
    SacrificialDivination,
    /// Adds Willpower.
    Furore,
    /// Adds Intellect.
    Bloodletting,
    /// Adds Intellect.
    Gnostic,
}

impl VoidMethod {
    /// Match a method name exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Sacrificial Divination" => Some(Self::SacrificialDivination),
            "Furore" => Some(Self::Furore),
            "Bloodletting" => Some(Self::Bloodletting),
            "Gnostic" => Some(Self::Gnostic),
            _ => None,
        }
    }
}

/// Split a `<category> - <method>` display name into its method part.
pub fn method_name(display_name: &str) -> Option<&str> {
    display_name.split(" - ").nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_name_is_second_segment() {
        assert_eq!(method_name("Ritual - Furore"), Some("Furore"));
        assert_eq!(
            method_name("Omen - Sacrificial Divination"),
            Some("Sacrificial Divination")
        );
        assert_eq!(method_name("Furore"), None);
        assert_eq!(method_name("Ritual-Furore"), None);
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(VoidMethod::from_name("Gnostic"), Some(VoidMethod::Gnostic));
        assert_eq!(VoidMethod::from_name("gnostic"), None);
        assert_eq!(VoidMethod::from_name("Foo"), None);
    }
}
