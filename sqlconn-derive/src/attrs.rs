//! `#[sqlconn(...)]` attribute parsing shared by both derives

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Error, Field, Fields, Ident, Result};

/// Case convention applied to field names by `rename_all`.
#[derive(Clone, Copy)]
pub enum RenameRule {
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Lower,
    Upper,
}

impl RenameRule {
    fn parse(lit: &syn::LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            other => Err(Error::new(
                lit.span(),
                format!("unknown rename_all rule `{}`", other),
            )),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Self::Pascal => name.to_upper_camel_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
        }
    }
}

/// Per-field configuration
pub struct FieldConfig {
    /// The field identifier
    pub ident: Ident,
    /// Column / parameter name (after rename or rename_all)
    pub column_name: String,
    /// Not read from rows
    pub skip: bool,
    /// Not turned into a parameter
    pub skip_param: bool,
    /// The field type
    pub ty: syn::Type,
}

fn unknown(meta: &syn::meta::ParseNestedMeta) -> Error {
    meta.error(format!(
        "unknown sqlconn attribute `{}`",
        meta.path
            .get_ident()
            .map(|i| i.to_string())
            .unwrap_or_default()
    ))
}

fn container_rule(attrs: &[Attribute]) -> Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in attrs {
        if attr.path().is_ident("sqlconn") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    rule = Some(RenameRule::parse(&lit)?);
                    Ok(())
                } else {
                    Err(unknown(&meta))
                }
            })?;
        }
    }
    Ok(rule)
}

fn parse_field_config(field: &Field, rule: Option<RenameRule>) -> Result<FieldConfig> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new(field.span(), "tuple structs are not supported"))?;

    let field_name = ident.to_string();
    let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
    let mut column_name = match rule {
        Some(rule) => rule.apply(field_name),
        None => field_name.to_string(),
    };
    let mut skip = false;
    let mut skip_param = false;

    for attr in &field.attrs {
        if attr.path().is_ident("sqlconn") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    column_name = lit.value();
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("skip_param") {
                    skip_param = true;
                } else {
                    return Err(unknown(&meta));
                }
                Ok(())
            })?;
        }
    }

    Ok(FieldConfig {
        ident,
        column_name,
        skip,
        skip_param,
        ty: field.ty.clone(),
    })
}

/// Field configurations of a struct with named fields, in declaration order.
pub fn struct_fields(input: &DeriveInput) -> Result<Vec<FieldConfig>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(Error::new(input.span(), "only named fields are supported")),
        },
        _ => return Err(Error::new(input.span(), "only structs are supported")),
    };

    let rule = container_rule(&input.attrs)?;
    fields
        .iter()
        .map(|field| parse_field_config(field, rule))
        .collect()
}
