// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat,
    ReturnType, Type,
};

/// Separator reserved by label identifiers.
const TAG_SEPARATOR: char = '_';

/// What a tagged method becomes in the registry.
enum MemberKind {
    /// `fn(&self) -> &Section`
    Section { target: Type },
    /// `fn(&self) -> impl ToString`
    Value,
    /// `fn(&self, args...) -> impl ToString`
    Call { parameters: Vec<ParamInfo> },
}

struct ParamInfo {
    ident: Ident,
    ty: Type,
    tag: Option<LitStr>,
}

struct MemberInfo {
    ident: Ident,
    name: String,
    tag: LitStr,
    kind: MemberKind,
}

/// `#[section]` attribute: generates `tagpath::Section` + a `<Type>Path` trait
///
/// Applies to an inherent `impl` block. Methods annotated with
/// `#[label("tag")]` become navigable members:
/// - `fn(&self) -> &T` registers a nested section `T`
/// - `fn(&self) -> R` registers a text value (`R: ToString`); this includes
///   `&str`, `&String` and `&Cow<str>`
/// - `fn(&self, a: A, ...) -> R` registers a call; each parameter may carry
///   its own `#[label("tag")]`, otherwise its name is used
///
/// Call parameters must be owned `tagpath::ParamValue` types (`String`, not
/// `&str`). The generated path method takes `impl Into<tagpath::Arg<A>>` for
/// each of them. Returning `&T` for any other `T` requires `T: Section`.
///
/// Unannotated methods are left alone.
///
/// Example:
/// ```ignore
/// use tagpath::section;
///
/// pub struct Jobs;
///
/// #[section]
/// impl Jobs {
///     #[label("dev")]
///     pub fn developer(&self, #[label("xp")] experience: String) -> String {
///         format!("{experience} Software Developer")
///     }
///
///     #[label("qa")]
///     pub fn qa(&self) -> &'static str {
///         "Quality Assurance Engineer"
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn section(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[section] takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    let mut input = parse_macro_input!(item as ItemImpl);
    match expand_section(&mut input) {
        Ok(generated) => quote! {
            #input
            #generated
        }
        .into(),
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #input
                #err
            }
            .into()
        }
    }
}

fn expand_section(input: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[section] applies to inherent impl blocks only",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Generic sections are not supported",
        ));
    }

    let self_ty = (*input.self_ty).clone();
    let Type::Path(type_path) = &self_ty else {
        return Err(syn::Error::new_spanned(&self_ty, "Expected a named type"));
    };
    let Some(last) = type_path.path.segments.last() else {
        return Err(syn::Error::new_spanned(&self_ty, "Expected a named type"));
    };
    let path_trait = format_ident!("{}Path", last.ident);

    let mut members = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            if let Some(member) = parse_member(method)? {
                members.push(member);
            }
        }
    }

    let registrations = members.iter().map(registration);
    let signatures = members.iter().map(|m| path_signature(m, &self_ty));
    let bodies = members.iter().map(|m| path_body(m, &self_ty));
    let trait_doc = format!(
        "Typed label paths through the tagged members of [`{}`].",
        last.ident
    );

    Ok(quote! {
        impl ::tagpath::Section for #self_ty {
            #[allow(unused_variables)]
            fn describe(members: &mut ::tagpath::Members<'_, Self>) {
                #(#registrations)*
            }
        }

        #[doc = #trait_doc]
        pub trait #path_trait {
            #(#signatures;)*
        }

        impl #path_trait for ::tagpath::Path<#self_ty> {
            #(#bodies)*
        }
    })
}

/// Take the `#[label("..")]` attribute out of `attrs`, if any.
fn take_label(attrs: &mut Vec<Attribute>) -> syn::Result<Option<LitStr>> {
    let Some(index) = attrs.iter().position(|a| a.path().is_ident("label")) else {
        return Ok(None);
    };
    let attr = attrs.remove(index);
    let tag: LitStr = attr.parse_args()?;
    if let Some(duplicate) = attrs.iter().find(|a| a.path().is_ident("label")) {
        return Err(syn::Error::new_spanned(duplicate, "Duplicate #[label]"));
    }
    Ok(Some(tag))
}

fn check_tag(tag: &LitStr) -> syn::Result<()> {
    let value = tag.value();
    if value.trim().is_empty() {
        return Err(syn::Error::new_spanned(tag, "Label tag must not be blank"));
    }
    if value.contains(TAG_SEPARATOR) {
        return Err(syn::Error::new_spanned(
            tag,
            format!("Label tag must not contain '{TAG_SEPARATOR}'"),
        ));
    }
    Ok(())
}

fn parse_member(method: &mut ImplItemFn) -> syn::Result<Option<MemberInfo>> {
    let Some(tag) = take_label(&mut method.attrs)? else {
        // Parameter attributes on untagged methods are stripped all the same.
        for input in &mut method.sig.inputs {
            if let FnArg::Typed(pat_type) = input {
                pat_type.attrs.retain(|a| !a.path().is_ident("label"));
            }
        }
        return Ok(None);
    };
    check_tag(&tag)?;

    let sig = &mut method.sig;
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "Tagged members cannot be generic",
        ));
    }
    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "Tagged members must take `&self`",
            ))
        }
    }
    let ReturnType::Type(_, output) = &sig.output else {
        return Err(syn::Error::new_spanned(
            &sig.ident,
            "Tagged members must return a value",
        ));
    };
    let output = (**output).clone();

    let mut parameters = Vec::new();
    for input in sig.inputs.iter_mut().skip(1) {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        let tag = take_label(&mut pat_type.attrs)?;
        if let Some(tag) = &tag {
            check_tag(tag)?;
        }
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new_spanned(
                &pat_type.pat,
                "Parameters of tagged members must be plain identifiers",
            ));
        };
        if let Type::Reference(reference) = &*pat_type.ty {
            let hint = if is_ident(&reference.elem, "str") {
                "use `String` instead of `&str`"
            } else {
                "use an owned type"
            };
            return Err(syn::Error::new_spanned(
                &pat_type.ty,
                format!("Parameters of tagged members cannot be references, {hint}"),
            ));
        }
        parameters.push(ParamInfo {
            ident: pat_ident.ident.clone(),
            ty: (*pat_type.ty).clone(),
            tag,
        });
    }

    let kind = if !parameters.is_empty() {
        MemberKind::Call { parameters }
    } else {
        match section_target(&output) {
            Some(target) => MemberKind::Section { target },
            None => MemberKind::Value,
        }
    };

    Ok(Some(MemberInfo {
        ident: sig.ident.clone(),
        name: sig.ident.unraw().to_string(),
        tag,
        kind,
    }))
}

/// Borrowed text types that read as values, not sections.
const TEXT_TYPES: &[&str] = &["str", "String", "Cow"];

/// `&T` points at a nested section unless `T` is text, a slice or an array.
fn section_target(output: &Type) -> Option<Type> {
    let Type::Reference(reference) = output else {
        return None;
    };
    match &*reference.elem {
        Type::Slice(_) | Type::Array(_) => None,
        elem if TEXT_TYPES.iter().any(|name| is_ident(elem, name)) => None,
        elem => Some(elem.clone()),
    }
}

/// `ty` is a path whose last segment is `name` (`String`, `std::string::String`).
fn is_ident(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(path) => {
            path.qself.is_none()
                && path
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == name)
        }
        _ => false,
    }
}

fn registration(member: &MemberInfo) -> TokenStream2 {
    let MemberInfo {
        ident, name, tag, ..
    } = member;
    match &member.kind {
        MemberKind::Section { target } => quote! {
            members.section::<#target>(#name, #tag, Self::#ident);
        },
        MemberKind::Value => quote! {
            members.value(#name, #tag, |this: &Self| {
                ::std::string::ToString::to_string(&this.#ident())
            });
        },
        MemberKind::Call { parameters } => {
            let declared = parameters.iter().map(|p| {
                let ty = &p.ty;
                let pname = p.ident.unraw().to_string();
                match &p.tag {
                    Some(ptag) => quote! { ::tagpath::Parameter::of::<#ty>(#pname).tagged(#ptag) },
                    None => quote! { ::tagpath::Parameter::of::<#ty>(#pname) },
                }
            });
            let extracted = parameters.iter().enumerate().map(|(i, p)| {
                let ty = &p.ty;
                let index = Literal::usize_unsuffixed(i);
                quote! { ::tagpath::extract::<#ty>(args, #index) }
            });
            quote! {
                members.call(
                    #name,
                    #tag,
                    [#(#declared),*],
                    |this: &Self, args: &[::tagpath::Value]| {
                        ::std::string::ToString::to_string(&this.#ident(#(#extracted),*))
                    },
                );
            }
        }
    }
}

fn path_signature(member: &MemberInfo, _self_ty: &Type) -> TokenStream2 {
    let ident = &member.ident;
    match &member.kind {
        MemberKind::Section { target } => quote! {
            fn #ident(self) -> ::tagpath::Path<#target>
        },
        MemberKind::Value => quote! {
            fn #ident(self) -> ::tagpath::PathExpr
        },
        MemberKind::Call { parameters } => {
            let names = parameters.iter().map(|p| &p.ident);
            let types = parameters.iter().map(|p| &p.ty);
            quote! {
                fn #ident(
                    self,
                    #(#names: impl ::core::convert::Into<::tagpath::Arg<#types>>),*
                ) -> ::tagpath::PathExpr
            }
        }
    }
}

fn path_body(member: &MemberInfo, self_ty: &Type) -> TokenStream2 {
    let signature = path_signature(member, self_ty);
    let name = &member.name;
    let body = match &member.kind {
        MemberKind::Section { target } => quote! {
            ::tagpath::Path::<#self_ty>::section::<#target>(self, #name)
        },
        MemberKind::Value => quote! {
            ::tagpath::Path::<#self_ty>::value(self, #name)
        },
        MemberKind::Call { parameters } => {
            let args = parameters.iter().map(|p| {
                let (pident, ty) = (&p.ident, &p.ty);
                quote! {
                    ::tagpath::Arg::<#ty>::into_expr(
                        ::core::convert::Into::<::tagpath::Arg<#ty>>::into(#pident)
                    )
                }
            });
            quote! {
                ::tagpath::Path::<#self_ty>::call(self, #name, [#(#args),*])
            }
        }
    };
    quote! {
        #signature {
            #body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(item: TokenStream2) -> ItemImpl {
        syn::parse2(item).unwrap()
    }

    #[test]
    fn test_expand_classifies_members() {
        let mut input = parse(quote! {
            impl Provider {
                #[label("j")]
                fn jobs(&self) -> &Jobs { &self.jobs }

                #[label("n")]
                fn name(&self) -> &str { "provider" }

                #[label("dev")]
                fn dev(&self, #[label("xp")] experience: String, years: i32) -> String {
                    String::new()
                }

                fn helper(&self) -> u32 { 0 }
            }
        });

        let generated = expand_section(&mut input).unwrap().to_string();
        assert!(generated.contains("members . section :: < Jobs >"));
        assert!(generated.contains("members . value (\"name\" , \"n\""));
        assert!(generated.contains("tagged (\"xp\")"));
        assert!(generated.contains("Parameter :: of :: < i32 > (\"years\")"));
        assert!(generated.contains("pub trait ProviderPath"));
        assert!(!generated.contains("helper"));

        // Attributes are consumed.
        let rewritten = quote!(#input).to_string();
        assert!(!rewritten.contains("label"));
    }

    #[test]
    fn test_rejects_invalid_tags() {
        let mut input = parse(quote! {
            impl Provider {
                #[label("a_b")]
                fn jobs(&self) -> &Jobs { &self.jobs }
            }
        });
        let err = expand_section(&mut input).unwrap_err();
        assert!(err.to_string().contains("must not contain"));

        let mut input = parse(quote! {
            impl Provider {
                #[label(" ")]
                fn jobs(&self) -> &Jobs { &self.jobs }
            }
        });
        assert!(expand_section(&mut input).is_err());
    }

    #[test]
    fn test_call_arguments_are_typed() {
        let mut input = parse(quote! {
            impl Jobs {
                #[label("dev")]
                fn dev(&self, experience: String, years: i32) -> String {
                    String::new()
                }
            }
        });
        let generated: String = expand_section(&mut input)
            .unwrap()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert!(generated.contains("experience:impl::core::convert::Into<::tagpath::Arg<String>>"));
        assert!(generated.contains("years:impl::core::convert::Into<::tagpath::Arg<i32>>"));
        assert!(!generated.contains("Into<::tagpath::ArgExpr>"));
    }

    #[test]
    fn test_rejects_reference_parameters() {
        let mut input = parse(quote! {
            impl Jobs {
                #[label("dev")]
                fn dev(&self, experience: &str) -> String {
                    String::new()
                }
            }
        });
        let err = expand_section(&mut input).unwrap_err();
        assert!(err.to_string().contains("use `String` instead of `&str`"));

        let mut input = parse(quote! {
            impl Jobs {
                #[label("dev")]
                fn dev(&self, years: &i32) -> String {
                    String::new()
                }
            }
        });
        let err = expand_section(&mut input).unwrap_err();
        assert!(err.to_string().contains("cannot be references"));
    }

    #[test]
    fn test_borrowed_text_is_a_value() {
        let mut input = parse(quote! {
            impl Provider {
                #[label("n")]
                fn name(&self) -> &String { &self.name }

                #[label("b")]
                fn bytes(&self) -> &'static [u8] { b"raw" }

                #[label("t")]
                fn title(&self) -> &std::string::String { &self.title }

                #[label("j")]
                fn jobs(&self) -> &Jobs { &self.jobs }
            }
        });
        let generated = expand_section(&mut input).unwrap().to_string();
        assert!(generated.contains("members . value (\"name\" , \"n\""));
        assert!(generated.contains("members . value (\"title\" , \"t\""));
        assert!(generated.contains("members . section :: < Jobs >"));
        assert!(!generated.contains("section :: < String >"));
    }

    #[test]
    fn test_rejects_mutable_receiver() {
        let mut input = parse(quote! {
            impl Provider {
                #[label("j")]
                fn jobs(&mut self) -> &Jobs { &self.jobs }
            }
        });
        let err = expand_section(&mut input).unwrap_err();
        assert!(err.to_string().contains("&self"));
    }
}
