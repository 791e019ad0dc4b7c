use std::collections::HashSet;

use crate::model::{DeriveEnum, DeriveVariant};
use crate::{ATTRIBUTE, MACRO_OPTION_ENUM};

impl TryFrom<syn::DeriveInput> for DeriveEnum {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let enum_name = &value.ident;

        match &value.data {
            syn::Data::Enum(de) => {
                let variants = de
                    .variants
                    .iter()
                    .map(DeriveVariant::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let mut texts = HashSet::new();

                for variant in &variants {
                    if !texts.insert(variant.text.as_str()) {
                        return Err(syn::Error::new(
                            variant.field_name.span(),
                            format!(
                                "Invalid - {MACRO_OPTION_ENUM} variant text '{}' is repeated.",
                                variant.text
                            ),
                        ));
                    }
                }

                Ok(DeriveEnum {
                    enum_name: enum_name.clone(),
                    variants,
                })
            }
            _ => Err(syn::Error::new(
                enum_name.span(),
                format!("Invalid - {MACRO_OPTION_ENUM} only applies to 'enum' data structures."),
            )),
        }
    }
}

impl TryFrom<&syn::Variant> for DeriveVariant {
    type Error = syn::Error;

    fn try_from(value: &syn::Variant) -> Result<Self, Self::Error> {
        let field_name = value.ident.clone();

        if !matches!(value.fields, syn::Fields::Unit) {
            return Err(syn::Error::new(
                field_name.span(),
                format!("Invalid - {MACRO_OPTION_ENUM} variant '{field_name}' must be a unit variant."),
            ));
        }

        let mut text = field_name.to_string();

        for attribute in &value.attrs {
            if attribute.path().is_ident(ATTRIBUTE) {
                attribute.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let rename: syn::LitStr = meta.value()?.parse()?;
                        text = rename.value();
                        Ok(())
                    } else {
                        Err(meta.error("Invalid - expected `rename = \"..\"`."))
                    }
                })?;
            }
        }

        // The text doubles as an alias, so must form a single token.
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return Err(syn::Error::new(
                field_name.span(),
                format!("Invalid - {MACRO_OPTION_ENUM} variant text '{text}' must be non-empty without whitespace."),
            ));
        }

        Ok(DeriveVariant { field_name, text })
    }
}
