use super::single_generic_type;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Field, Fields, Lit, LitStr, Type};

/// How a single field obtains its value.
enum Resolution<'a> {
    Required { ty: &'a Type, name: Option<LitStr> },
    Optional { ty: &'a Type, name: Option<LitStr> },
    Default,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable can only be derived for structs",
        ));
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &data.fields {
        Fields::Named(fields) => {
            let inits = fields
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    let value = resolution_expr(&parse_field(field)?);
                    Ok(quote! { #ident: #value })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { Self { #(#inits),* } }
        },
        Fields::Unnamed(fields) => {
            let inits = fields
                .unnamed
                .iter()
                .map(|field| parse_field(field).map(|r| resolution_expr(&r)))
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { Self(#(#inits),*) }
        },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::bindery_core::Injectable for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn inject(
                resolver: &dyn ::bindery_core::Resolver,
            ) -> ::std::result::Result<Self, ::bindery_core::ResolveError> {
                ::std::result::Result::Ok(#body)
            }
        }
    })
}

fn parse_field(field: &Field) -> syn::Result<Resolution<'_>> {
    let mut name = None;
    let mut use_default = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                use_default = true;
                return Ok(());
            }
            if meta.path.is_ident("named") {
                if name.is_some() {
                    return Err(meta.error("Duplicate `named = \"...\"` argument"));
                }
                let value: Expr = meta.value()?.parse()?;
                let Expr::Lit(expr) = &value else {
                    return Err(syn::Error::new_spanned(value, "Expected a string literal"));
                };
                let Lit::Str(lit) = &expr.lit else {
                    return Err(syn::Error::new_spanned(&expr.lit, "Expected a string literal"));
                };
                name = Some(lit.clone());
                return Ok(());
            }
            Err(meta.error("Supported arguments are `named = \"...\"` and `default`"))
        })?;
    }

    if use_default {
        if name.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "`default` fields are not resolved and cannot be `named`",
            ));
        }
        return Ok(Resolution::Default);
    }

    if let Some(ty) = single_generic_type(&field.ty, "Arc") {
        return Ok(Resolution::Required { ty, name });
    }
    if let Some(ty) = single_generic_type(&field.ty, "Option").and_then(|t| single_generic_type(t, "Arc"))
    {
        return Ok(Resolution::Optional { ty, name });
    }

    Err(syn::Error::new_spanned(
        &field.ty,
        "Injectable fields must be `Arc<T>`, `Option<Arc<T>>` or marked `#[inject(default)]`",
    ))
}

fn resolution_expr(resolution: &Resolution<'_>) -> TokenStream {
    let key = |ty: &Type, name: &Option<LitStr>| match name {
        Some(name) => quote! {
            ::bindery_core::Key::of::<#ty>().qualified(::bindery_core::named(#name))
        },
        None => quote! { ::bindery_core::Key::of::<#ty>() },
    };

    match resolution {
        Resolution::Required { ty, name } => {
            let key = key(ty, name);
            quote! { ::bindery_core::ResolverExt::get_key::<#ty>(resolver, &#key)? }
        },
        Resolution::Optional { ty, name } => {
            let key = key(ty, name);
            quote! { ::bindery_core::ResolverExt::find_key::<#ty>(resolver, &#key)? }
        },
        Resolution::Default => quote! { ::std::default::Default::default() },
    }
}
