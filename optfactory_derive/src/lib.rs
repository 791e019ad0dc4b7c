extern crate proc_macro;

mod generate;
mod load;
mod model;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

use crate::model::DeriveEnum;

const MACRO_OPTION_ENUM: &str = "OptionEnum";
const ATTRIBUTE: &str = "optfactory";

#[proc_macro_derive(OptionEnum, attributes(optfactory))]
pub fn option_enum(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveEnum::try_from(derive_input)
        .and_then(TokenStream2::try_from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
