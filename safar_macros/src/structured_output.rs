use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, ensure_named_struct, parse_structured_output_args, resolve_description,
    resolve_schema_name,
};

pub fn structured_output(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse_structured_output_args(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    if let Err(err) = ensure_named_struct(&item_struct) {
        return err.to_compile_error().into();
    }

    if !item_struct.generics.params.is_empty() {
        return syn::Error::new(
            item_struct.generics.span(),
            "`#[structured_output]` cannot be applied to generic structs",
        )
        .to_compile_error()
        .into();
    }

    let schema_name = resolve_schema_name(&item_struct, args.name.as_ref());
    let description = resolve_description(
        args.description.as_ref(),
        collect_doc_comments(&item_struct.attrs),
    );
    let description_tokens = match description {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };

    let type_name = LitStr::new(&item_struct.ident.to_string(), Span::call_site());
    let ident = &item_struct.ident;

    let expanded = quote! {
        #item_struct

        impl safar_rs::schema::StructuredOutput for #ident {
            fn schema() -> &'static safar_rs::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<safar_rs::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    safar_rs::schema::apply_root_metadata(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                    );
                    safar_rs::schema::SchemaHandle::from_root_schema::<Self>(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }
        }
    };

    expanded.into()
}
