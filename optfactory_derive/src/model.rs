#[derive(Debug, PartialEq, Eq)]
pub struct DeriveVariant {
    pub field_name: syn::Ident,
    /// The text which selects this variant (the variant name, unless renamed).
    pub text: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveEnum {
    pub enum_name: syn::Ident,
    pub variants: Vec<DeriveVariant>,
}
