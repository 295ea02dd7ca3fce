use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_required_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Item, ItemStruct, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream,
    parse_macro_input,
};

/// #[entity] 宏实现
/// - 将 `id: u64`、`guid: Uuid`、`version: Version` 置于字段最前（已存在则复用）
/// - 合并派生：Debug(可关闭), Clone, Default, Serialize, Deserialize
/// - 实现 `::pixel_domain::entity::Entity`
/// - 参数：
///   - `name` 实体类型名，默认取结构体名，用于错误消息与存储表名
///   - `debug` 默认 `true`；为 `false` 时不派生 Debug
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let required: Vec<(syn::Ident, Type)> = vec![
        (syn::parse_quote!(id), syn::parse_quote!(u64)),
        (
            syn::parse_quote!(guid),
            syn::parse_quote!(::pixel_domain::entity::Uuid),
        ),
        (
            syn::parse_quote!(version),
            syn::parse_quote!(::pixel_domain::value_object::Version),
        ),
    ];
    ensure_required_fields(fields_named, &required);

    let mut derives: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        derives.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, derives);

    let out_struct = ItemStruct { ..st };

    let ident = &out_struct.ident;
    let type_name = cfg
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::pixel_domain::entity::Entity for #ident #ty_generics #where_clause {
            const TYPE: &'static str = #type_name;

            fn with_guid(guid: ::pixel_domain::entity::Uuid) -> Self {
                Self { guid, ..Default::default() }
            }

            fn id(&self) -> u64 { self.id }

            fn guid(&self) -> ::pixel_domain::entity::Uuid { self.guid }

            fn version(&self) -> ::pixel_domain::value_object::Version { self.version }

            fn restore(&mut self, id: u64, version: ::pixel_domain::value_object::Version) {
                self.id = id;
                self.version = version;
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    name: Option<LitStr>,
    derive_debug: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut derive_debug: Option<bool> = None;

        let elems: Punctuated<EntityAttrElem, Token![,]> =
            Punctuated::<EntityAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityAttrElem::Name(lit) => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    name = Some(lit);
                }
                EntityAttrElem::Debug(b) => {
                    if derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    derive_debug = Some(b);
                }
            }
        }

        Ok(Self { name, derive_debug })
    }
}

enum EntityAttrElem {
    Name(LitStr),
    Debug(bool),
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let expr: syn::Expr = input.parse()?;
        let lit = match expr {
            syn::Expr::Lit(syn::ExprLit { lit, .. }) => lit,
            other => {
                return Err(syn::Error::new(other.span(), "expected literal value"));
            }
        };

        match (key.to_string().as_str(), lit) {
            ("name", syn::Lit::Str(s)) => Ok(EntityAttrElem::Name(s)),
            ("debug", syn::Lit::Bool(b)) => Ok(EntityAttrElem::Debug(b.value())),
            ("name", other) => Err(syn::Error::new(
                other.span(),
                "expected string literal for 'name'",
            )),
            ("debug", other) => Err(syn::Error::new(
                other.span(),
                "expected boolean literal for 'debug'",
            )),
            _ => Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'name' or 'debug'",
            )),
        }
    }
}
