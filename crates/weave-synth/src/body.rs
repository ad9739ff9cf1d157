//! Method bodies for the four JSON operations.
//!
//! Each operation has a fixed shape (modifiers, parameters, return type) and
//! a body made of a single `return` statement that drives the configured
//! serialization library. Bodies are built as a small expression tree and
//! only turned into text by [`crate::render`], so type names can be written
//! through the pass's import table.

use std::fmt;

use serde::Serialize;
use weave_common::TypeRef;

use crate::config::SerializerProfile;
use crate::ident::Identifier;
use crate::method::{Modifiers, Param};

/// The operations the synthesizer knows how to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JsonOperation {
    ToJson,
    FromJson,
    ToJsonArray,
    FromJsonArray,
}

impl JsonOperation {
    /// Generation order within a pass.
    pub const ALL: [JsonOperation; 4] = [
        JsonOperation::ToJson,
        JsonOperation::FromJson,
        JsonOperation::ToJsonArray,
        JsonOperation::FromJsonArray,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JsonOperation::ToJson => "toJson",
            JsonOperation::FromJson => "fromJson",
            JsonOperation::ToJsonArray => "toJsonArray",
            JsonOperation::FromJsonArray => "fromJsonArray",
        }
    }

    /// The signature this operation gets for `bean`.
    pub fn shape(self, bean: &TypeRef) -> OperationShape {
        let json_param = || Param::new(TypeRef::string(), Identifier::trusted("json"));
        match self {
            JsonOperation::ToJson => OperationShape {
                modifiers: Modifiers::PUBLIC,
                params: Vec::new(),
                return_type: TypeRef::string(),
            },
            JsonOperation::FromJson => OperationShape {
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
                params: vec![json_param()],
                return_type: bean.clone(),
            },
            JsonOperation::ToJsonArray => OperationShape {
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
                params: vec![Param::new(
                    TypeRef::collection(bean.clone()),
                    Identifier::trusted("collection"),
                )],
                return_type: TypeRef::string(),
            },
            JsonOperation::FromJsonArray => OperationShape {
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC,
                params: vec![json_param()],
                return_type: TypeRef::collection(bean.clone()),
            },
        }
    }
}

impl fmt::Display for JsonOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Modifiers, parameters and return type of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationShape {
    pub modifiers: Modifiers,
    pub params: Vec<Param>,
    pub return_type: TypeRef,
}

impl OperationShape {
    /// Parameter types in order, the key used to probe for overrides.
    pub fn param_types(&self) -> Vec<TypeRef> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }
}

/// An expression in a generated body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// `new T()`; type arguments on `T` are written out.
    New(TypeRef),
    /// `receiver.method(args)`.
    Call {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Str(String),
    Null,
    /// `T.class`, always on the erased type.
    ClassLit(TypeRef),
    Var(String),
    This,
}

impl Expr {
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Return(Expr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub stmts: Vec<Stmt>,
}

impl Body {
    pub fn returning(expr: Expr) -> Body {
        Body {
            stmts: vec![Stmt::Return(expr)],
        }
    }
}

/// Builds bodies for one bean against one serializer profile.
pub struct BodyComposer<'a> {
    bean: &'a TypeRef,
    profile: &'a SerializerProfile,
}

impl<'a> BodyComposer<'a> {
    pub fn new(bean: &'a TypeRef, profile: &'a SerializerProfile) -> Self {
        BodyComposer { bean, profile }
    }

    pub fn compose(&self, op: JsonOperation) -> Body {
        match op {
            JsonOperation::ToJson => self.to_json(),
            JsonOperation::FromJson => self.from_json(),
            JsonOperation::ToJsonArray => self.to_json_array(),
            JsonOperation::FromJsonArray => self.from_json_array(),
        }
    }

    /// `return new Serializer().exclude(..).serialize(this);`
    pub fn to_json(&self) -> Body {
        Body::returning(self.serialize(Expr::This))
    }

    /// `return new Deserializer<Bean>().use(null, Bean.class).deserialize(json);`
    pub fn from_json(&self) -> Body {
        let deserializer = TypeRef::generic(
            self.profile.deserializer.qualified_name(),
            vec![self.bean.clone()],
        );
        Body::returning(
            Expr::New(deserializer)
                .call("use", vec![Expr::Null, Expr::ClassLit(self.bean.clone())])
                .call("deserialize", vec![Expr::Var("json".to_string())]),
        )
    }

    /// `return new Serializer().exclude(..).serialize(collection);`
    pub fn to_json_array(&self) -> Body {
        Body::returning(self.serialize(Expr::Var("collection".to_string())))
    }

    /// `return new Deserializer<List<Bean>>().use(null, ArrayList.class)
    ///     .use("values", Bean.class).deserialize(json);`
    pub fn from_json_array(&self) -> Body {
        let deserializer = TypeRef::generic(
            self.profile.deserializer.qualified_name(),
            vec![TypeRef::list(self.bean.clone())],
        );
        Body::returning(
            Expr::New(deserializer)
                .call("use", vec![Expr::Null, Expr::ClassLit(TypeRef::array_list())])
                .call(
                    "use",
                    vec![
                        Expr::Str("values".to_string()),
                        Expr::ClassLit(self.bean.clone()),
                    ],
                )
                .call("deserialize", vec![Expr::Var("json".to_string())]),
        )
    }

    fn serialize(&self, target: Expr) -> Expr {
        let mut expr = Expr::New(self.profile.serializer.clone());
        if !self.profile.exclude.is_empty() {
            let patterns = self
                .profile
                .exclude
                .patterns()
                .iter()
                .map(|p| Expr::Str(p.clone()))
                .collect();
            expr = expr.call("exclude", patterns);
        }
        expr.call("serialize", vec![target])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionPolicy;

    fn pet() -> TypeRef {
        TypeRef::new("com.example.Pet")
    }

    #[test]
    fn to_json_is_an_instance_method() {
        let shape = JsonOperation::ToJson.shape(&pet());
        assert_eq!(shape.modifiers, Modifiers::PUBLIC);
        assert!(shape.params.is_empty());
        assert_eq!(shape.return_type, TypeRef::string());
    }

    #[test]
    fn other_operations_are_static() {
        for op in [
            JsonOperation::FromJson,
            JsonOperation::ToJsonArray,
            JsonOperation::FromJsonArray,
        ] {
            assert!(op.shape(&pet()).modifiers.contains(Modifiers::STATIC), "{op}");
        }
    }

    #[test]
    fn array_operations_use_collections() {
        let to_array = JsonOperation::ToJsonArray.shape(&pet());
        assert_eq!(to_array.param_types(), vec![TypeRef::collection(pet())]);
        assert_eq!(to_array.params[0].name, "collection");

        let from_array = JsonOperation::FromJsonArray.shape(&pet());
        assert_eq!(from_array.param_types(), vec![TypeRef::string()]);
        assert_eq!(from_array.return_type, TypeRef::collection(pet()));
    }

    #[test]
    fn from_json_returns_the_bean() {
        let shape = JsonOperation::FromJson.shape(&pet());
        assert_eq!(shape.return_type, pet());
        assert_eq!(shape.params[0].name, "json");
    }

    #[test]
    fn to_json_serializes_this_with_exclusions() {
        let profile = SerializerProfile::default();
        let bean = pet();
        let body = BodyComposer::new(&bean, &profile).to_json();
        let Stmt::Return(expr) = &body.stmts[0];
        assert_eq!(
            expr,
            &Expr::New(TypeRef::new("flexjson.JSONSerializer"))
                .call("exclude", vec![Expr::Str("*.class".into())])
                .call("serialize", vec![Expr::This])
        );
    }

    #[test]
    fn empty_exclusion_policy_drops_exclude_call() {
        let profile = SerializerProfile {
            exclude: ExclusionPolicy::none(),
            ..SerializerProfile::default()
        };
        let bean = pet();
        let body = BodyComposer::new(&bean, &profile).to_json_array();
        let Stmt::Return(expr) = &body.stmts[0];
        assert_eq!(
            expr,
            &Expr::New(TypeRef::new("flexjson.JSONSerializer"))
                .call("serialize", vec![Expr::Var("collection".into())])
        );
    }

    #[test]
    fn from_json_array_materializes_a_list() {
        let profile = SerializerProfile::default();
        let bean = pet();
        let body = BodyComposer::new(&bean, &profile).compose(JsonOperation::FromJsonArray);
        let Stmt::Return(Expr::Call { receiver, method, args }) = &body.stmts[0] else {
            panic!("expected a call chain");
        };
        assert_eq!(method, "deserialize");
        assert_eq!(args, &vec![Expr::Var("json".into())]);
        let Expr::Call { args: values_args, .. } = receiver.as_ref() else {
            panic!("expected use(\"values\", ..)");
        };
        assert_eq!(values_args[1], Expr::ClassLit(pet()));
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = JsonOperation::ALL.iter().map(|op| op.to_string()).collect();
        assert_eq!(labels, ["toJson", "fromJson", "toJsonArray", "fromJsonArray"]);
    }
}
