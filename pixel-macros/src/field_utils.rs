use syn::{Field, FieldsNamed, Token, Type, punctuated::Punctuated};

fn field_named<'a>(named: &'a Punctuated<Field, Token![,]>, name: &str) -> Option<&'a Field> {
    named
        .iter()
        .find(|f| f.ident.as_ref().map(|i| i == name).unwrap_or(false))
}

/// 确保具名字段结构体以给定顺序包含所需字段，并置于最前
/// - 已存在的同名字段复用原定义（保留其属性与可见性）
/// - 其余字段保持原有相对顺序
pub(crate) fn ensure_required_fields(
    fields_named: &mut FieldsNamed,
    required: &[(syn::Ident, Type)],
) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    for (ident, ty) in required.iter() {
        match field_named(&old_named, &ident.to_string()) {
            Some(existing) => new_named.push(existing.clone()),
            None => new_named.push(syn::parse_quote! { #ident: #ty }),
        }
    }

    for f in old_named.into_iter() {
        let is_required = f
            .ident
            .as_ref()
            .map(|i| required.iter().any(|(n, _)| i == n))
            .unwrap_or(false);
        if !is_required {
            new_named.push(f);
        }
    }

    fields_named.named = new_named;
}
