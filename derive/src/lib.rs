extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta, NestedMeta, UnOp,
};

/// `key = value` pairs of every `#[<attr>(...)]` attribute.
fn attr_values(attrs: &[Attribute], attr: &str) -> syn::Result<Vec<(Ident, Lit)>> {
    let mut out = vec![];
    for a in attrs {
        if !a.path.is_ident(attr) {
            continue;
        }

        match a.parse_meta()? {
            Meta::List(list) => {
                for nested in list.nested {
                    match nested {
                        NestedMeta::Meta(Meta::NameValue(nv)) => {
                            let key = nv.path.get_ident().cloned().ok_or_else(|| {
                                syn::Error::new(nv.path.span(), "expected identifier")
                            })?;
                            out.push((key, nv.lit));
                        }
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                format!("expected #[{}(key = value)]", attr),
                            ))
                        }
                    }
                }
            }
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    format!("expected #[{}(key = value)]", attr),
                ))
            }
        }
    }

    Ok(out)
}

fn string_attr(attrs: &[Attribute], attr: &str, key: &str) -> syn::Result<Option<String>> {
    for (k, lit) in attr_values(attrs, attr)? {
        if k != key {
            continue;
        }

        return match lit {
            Lit::Str(s) => Ok(Some(s.value())),
            other => Err(syn::Error::new(other.span(), "expected a string")),
        };
    }

    Ok(None)
}

fn int_attr(attrs: &[Attribute], attr: &str, key: &str) -> syn::Result<Option<u32>> {
    for (k, lit) in attr_values(attrs, attr)? {
        if k != key {
            continue;
        }

        return match lit {
            Lit::Int(i) => Ok(Some(i.base10_parse()?)),
            other => Err(syn::Error::new(other.span(), "expected an integer")),
        };
    }

    Ok(None)
}

/// `UnaryCall` -> `UNARY_CALL`
fn screaming_snake(ident: &str) -> String {
    let mut out = String::new();
    let mut prev: Option<char> = None;
    for c in ident.chars() {
        if c.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    out.push('_');
                }
            }
        }

        out.extend(c.to_uppercase());
        prev = Some(c);
    }

    out
}

/// Evaluates an enum discriminant, which must be an (optionally negated)
/// integer literal.
fn discriminant(expr: &Expr) -> syn::Result<i32> {
    match expr {
        Expr::Lit(l) => match &l.lit {
            Lit::Int(i) => i.base10_parse(),
            other => Err(syn::Error::new(other.span(), "expected an integer")),
        },
        Expr::Unary(u) if matches!(u.op, UnOp::Neg(_)) => {
            let v = discriminant(&u.expr)?;
            Ok(-v)
        }
        Expr::Group(g) => discriminant(&g.expr),
        Expr::Paren(p) => discriminant(&p.expr),
        other => Err(syn::Error::new(
            other.span(),
            "enum values must be integer literals",
        )),
    }
}

/// Implements `Enumeration`, `Element`, `Field` and `Default` for a fieldless
/// enum whose variants all have explicit values.
///
/// ```ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumeration)]
/// #[proto(name = "grpc.testing.PayloadType")]
/// pub enum PayloadType {
///     Compressable = 0,
/// }
/// ```
#[proc_macro_derive(Enumeration, attributes(proto))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input: DeriveInput = syn::parse_macro_input!(input);
    match enumeration(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn enumeration(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let full_name = string_attr(&input.attrs, "proto", "name")?
        .ok_or_else(|| syn::Error::new(name.span(), "missing #[proto(name = \"...\")]"))?;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => return Err(syn::Error::new(name.span(), "Enumeration requires an enum")),
    };

    let mut idents = vec![];
    let mut names = vec![];
    let mut values = vec![];
    for v in &data.variants {
        if !matches!(v.fields, Fields::Unit) {
            return Err(syn::Error::new(v.span(), "enum variants can't have fields"));
        }

        let (_, expr) = v
            .discriminant
            .as_ref()
            .ok_or_else(|| syn::Error::new(v.span(), "enum variants need explicit values"))?;

        idents.push(v.ident.clone());
        names.push(
            string_attr(&v.attrs, "proto", "name")?
                .unwrap_or_else(|| screaming_snake(&v.ident.to_string())),
        );
        values.push(discriminant(expr)?);
    }

    let first = idents
        .first()
        .ok_or_else(|| syn::Error::new(name.span(), "enums need at least one value"))?;

    Ok(quote! {
        impl ::typed_record::Enumeration for #name {
            fn descriptor() -> &'static ::typed_record::EnumDescriptor {
                static DESCRIPTOR: ::typed_record::EnumDescriptor = ::typed_record::EnumDescriptor {
                    name: #full_name,
                    values: &[
                        #( ::typed_record::EnumValueDescriptor { name: #names, number: #values }, )*
                    ],
                };
                &DESCRIPTOR
            }

            fn from_i32(v: i32) -> ::std::option::Option<Self> {
                match v {
                    #( #values => ::std::option::Option::Some(Self::#idents), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    #( #names => ::std::option::Option::Some(Self::#idents), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn value(&self) -> i32 {
                match self {
                    #( Self::#idents => #values, )*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #( Self::#idents => #names, )*
                }
            }
        }

        impl ::std::default::Default for #name {
            fn default() -> Self {
                Self::#first
            }
        }

        impl ::typed_record::Element for #name {
            const TYPE: ::typed_record::ElementType = ::typed_record::ElementType::Enum(#full_name);

            fn to_value(&self) -> ::typed_record::Value {
                ::typed_record::Value::Int(::typed_record::Enumeration::value(self) as i64)
            }

            fn from_value(value: ::typed_record::Value) -> ::typed_record::Result<Self> {
                ::typed_record::enum_from_value::<Self>(value)
            }
        }

        ::typed_record::impl_singular_field!(#name);
    })
}

/// Implements `Record`, `RecordType` and `Element` for a struct with named
/// fields. Every field type must implement `typed_record::Field`.
///
/// ```ignore
/// #[derive(Clone, Debug, Default, PartialEq, Record)]
/// #[record(name = "grpc.testing.Payload")]
/// pub struct Payload {
///     #[field(number = 1)]
///     pub r#type: PayloadType,
///     pub body: Vec<u8>,
/// }
/// ```
///
/// Field numbers default to the 1-based position of the field and names to
/// the Rust identifier.
#[proc_macro_derive(Record, attributes(record, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = syn::parse_macro_input!(input);
    match record(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let full_name = string_attr(&input.attrs, "record", "name")?
        .ok_or_else(|| syn::Error::new(name.span(), "missing #[record(name = \"...\")]"))?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "records can't be generic",
        ));
    }

    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(f) => &f.named,
            _ => return Err(syn::Error::new(name.span(), "records need named fields")),
        },
        _ => return Err(syn::Error::new(name.span(), "Record requires a struct")),
    };

    let mut idents = vec![];
    let mut names = vec![];
    let mut numbers = vec![];
    let mut types = vec![];
    for (i, f) in fields.iter().enumerate() {
        let ident = f
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(f.span(), "records need named fields"))?;

        let field_name = match string_attr(&f.attrs, "field", "name")? {
            Some(n) => n,
            None => ident.to_string().trim_start_matches("r#").to_string(),
        };

        let number = int_attr(&f.attrs, "field", "number")?.unwrap_or(i as u32 + 1);

        idents.push(ident);
        names.push(field_name);
        numbers.push(number);
        types.push(f.ty.clone());
    }

    Ok(quote! {
        impl ::typed_record::RecordType for #name {
            fn record_descriptor() -> &'static ::typed_record::RecordDescriptor {
                fn new_instance() -> ::std::boxed::Box<dyn ::typed_record::Record> {
                    ::std::boxed::Box::new(<#name as ::std::default::Default>::default())
                }

                static DESCRIPTOR: ::typed_record::RecordDescriptor = ::typed_record::RecordDescriptor {
                    name: #full_name,
                    fields: &[
                        #(
                            ::typed_record::FieldDescriptor {
                                name: #names,
                                number: #numbers,
                                ty: <#types as ::typed_record::Field>::TYPE,
                                presence: <#types as ::typed_record::Field>::PRESENCE,
                                default: <#types as ::typed_record::Field>::default_value,
                            },
                        )*
                    ],
                    new: new_instance,
                };
                &DESCRIPTOR
            }
        }

        impl ::typed_record::Record for #name {
            fn descriptor(&self) -> &'static ::typed_record::RecordDescriptor {
                <Self as ::typed_record::RecordType>::record_descriptor()
            }

            fn get(&self, field: &str) -> ::typed_record::Result<::typed_record::Value> {
                match field {
                    #( #names => Ok(::typed_record::Field::get_value(&self.#idents)), )*
                    _ => Err(::typed_record::derive::unknown_field(self.descriptor(), field)),
                }
            }

            #[allow(unused_variables)]
            fn set(&mut self, field: &str, value: ::typed_record::Value) -> ::typed_record::Result<()> {
                let descriptor = self.descriptor();
                match field {
                    #(
                        #names => ::typed_record::Field::set_value(&mut self.#idents, value)
                            .map_err(|e| ::typed_record::derive::in_field(descriptor, #names, e)),
                    )*
                    _ => Err(::typed_record::derive::unknown_field(descriptor, field)),
                }
            }

            fn has(&self, field: &str) -> ::typed_record::Result<bool> {
                match field {
                    #(
                        #names => ::typed_record::Field::has_value(&self.#idents).ok_or_else(|| {
                            ::typed_record::derive::no_presence(self.descriptor(), #names)
                        }),
                    )*
                    _ => Err(::typed_record::derive::unknown_field(self.descriptor(), field)),
                }
            }

            fn clear(&mut self, field: &str) -> ::typed_record::Result<()> {
                match field {
                    #(
                        #names => {
                            ::typed_record::Field::clear_value(&mut self.#idents);
                            Ok(())
                        }
                    )*
                    _ => Err(::typed_record::derive::unknown_field(self.descriptor(), field)),
                }
            }

            fn box_clone(&self) -> ::std::boxed::Box<dyn ::typed_record::Record> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn dyn_eq(&self, other: &dyn ::typed_record::Record) -> bool {
                ::typed_record::derive::dyn_eq(self, other)
            }
        }

        impl ::typed_record::Element for #name {
            const TYPE: ::typed_record::ElementType = ::typed_record::ElementType::Message(#full_name);

            fn to_value(&self) -> ::typed_record::Value {
                ::typed_record::Value::Message(::std::boxed::Box::new(::std::clone::Clone::clone(self)))
            }

            fn from_value(value: ::typed_record::Value) -> ::typed_record::Result<Self> {
                ::typed_record::record_from_value::<Self>(value)
            }
        }
    })
}
