//! Macros for ergonomic state part construction.

/// Generate a [`Name`](crate::core::Name) enum for a closed vocabulary.
///
/// Each variant's label defaults to its identifier. Use `Variant = "label"`
/// when the label is not a valid identifier (e.g. `"step-3-1"`).
///
/// # Example
///
/// ```
/// use storeparts::core::Name;
/// use storeparts::name_enum;
///
/// name_enum! {
///     pub enum WizardHandle {
///         NextStep = "nextStep",
///         PrevStep = "prevStep",
///         Cancel,
///     }
/// }
///
/// assert_eq!(WizardHandle::NextStep.as_str(), "nextStep");
/// assert_eq!(WizardHandle::Cancel.as_str(), "Cancel");
/// assert_eq!(WizardHandle::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! name_enum {
    (@label $variant:ident $label:literal) => {
        $label
    };

    (@label $variant:ident) => {
        stringify!($variant)
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $(#[serde(rename = $label)])?
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::Name for $name {
            fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::name_enum!(@label $variant $($label)?)),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::Name::as_str(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Name;

    name_enum! {
        enum Step {
            First = "step-1",
            Second = "step-2",
            Done,
        }
    }

    #[test]
    fn name_enum_macro_generates_trait() {
        assert_eq!(Step::First.as_str(), "step-1");
        assert_eq!(Step::Second.as_str(), "step-2");
        assert_eq!(Step::Done.as_str(), "Done");
        assert_eq!(Step::First.to_string(), "step-1");
    }

    #[test]
    fn name_enum_lists_variants_in_order() {
        assert_eq!(Step::ALL, &[Step::First, Step::Second, Step::Done]);
    }

    #[test]
    fn name_enum_serializes_with_labels() {
        let json = serde_json::to_string(&Step::First).unwrap();
        assert_eq!(json, "\"step-1\"");

        let back: Step = serde_json::from_str("\"Done\"").unwrap();
        assert_eq!(back, Step::Done);
    }

    #[test]
    fn name_enum_supports_visibility() {
        name_enum! {
            pub enum PublicHandle {
                Open,
                Close,
            }
        }

        assert_eq!(PublicHandle::Open.as_str(), "Open");
    }
}
