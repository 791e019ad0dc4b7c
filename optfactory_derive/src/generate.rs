use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveEnum, DeriveVariant};

impl TryFrom<DeriveEnum> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveEnum) -> Result<Self, Self::Error> {
        let DeriveEnum {
            enum_name,
            variants,
        } = value;
        let enum_name_str = enum_name.to_string();
        let (field_names, texts): (Vec<syn::Ident>, Vec<String>) = variants
            .into_iter()
            .map(|DeriveVariant { field_name, text }| (field_name, text))
            .unzip();

        Ok(quote! {
            impl ::optfactory::prelude::OptionEnum for #enum_name {
                const NAME: &'static str = #enum_name_str;
                const VARIANTS: &'static [&'static str] = &[#( #texts ),*];

                fn from_variant(variant: &str) -> ::std::option::Option<Self> {
                    match variant {
                        #( #texts => ::std::option::Option::Some(Self::#field_names), )*
                        _ => ::std::option::Option::None,
                    }
                }

                fn variant(&self) -> &'static str {
                    match *self {
                        #( Self::#field_names => #texts, )*
                    }
                }
            }
        })
    }
}
