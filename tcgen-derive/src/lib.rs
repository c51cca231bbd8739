//! Derive macros for tcgen case generators.
//!
//! This crate provides `#[derive(Case)]`, which turns a struct whose fields
//! are value descriptors into a case generator.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Index, Member};

/// Derive macro for implementing `tcgen::Case`.
///
/// Every field must implement `tcgen::Descriptor`. Each case resets all
/// fields, then renders them one per line in declaration order. Fields
/// marked `#[case(skip)]` are left alone.
///
/// # Example
///
/// ```rust,ignore
/// use tcgen::*;
///
/// #[derive(Case)]
/// struct Input {
///     n: Integer,
///     values: Array,
///     #[case(skip)]
///     notes: Text,
/// }
///
/// let mut sequencer = Sequencer::new(Config::default().with_cases(5));
/// let cases = sequencer.test_cases(&mut input)?;
/// ```
#[proc_macro_derive(Case, attributes(case))]
pub fn derive_case(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match case_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the implementation for the Case trait.
fn case_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let members = match &input.data {
        Data::Struct(data) => emitted_members(&data.fields)?,
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Case derive macro only supports structs",
            ));
        }
    };

    let resets = members.iter().map(|member| {
        quote! {
            tcgen::Descriptor::reset(&mut self.#member);
        }
    });

    let emits = members.iter().map(|member| {
        quote! {
            out.emit(&mut self.#member)?;
        }
    });

    Ok(quote! {
        impl #impl_generics tcgen::Case for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn generate(
                &mut self,
                _case_num: usize,
                out: &mut tcgen::Output<'_>,
            ) -> tcgen::Result<()> {
                #(#resets)*
                #(#emits)*
                Ok(())
            }
        }
    })
}

/// Members to emit, in declaration order.
fn emitted_members(fields: &Fields) -> Result<Vec<Member>, syn::Error> {
    let mut members = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(i)),
        };
        members.push(member);
    }
    Ok(members)
}

/// Whether the field carries `#[case(skip)]`.
fn is_skipped(field: &Field) -> Result<bool, syn::Error> {
    let mut skip = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("case")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown case attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
