//! Method and return type descriptions shared by accessor generation and
//! common-method promotion.

use std::fmt;

use sapling_core::Cardinality;

/// The type a method returns or takes, as the emitter will spell it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A declared type, compared and widened by name.
    Named {
        name: String,
        annotations: Vec<String>,
    },
    /// A parameterized type such as `List<T>`.
    Container {
        raw: String,
        args: Vec<TypeRef>,
        annotations: Vec<String>,
    },
    /// An upper-bounded argument (`? extends T`); only valid as a container
    /// argument.
    Covariant(Box<TypeRef>),
    /// Anything else (primitives, arrays). Only equal types are compatible.
    Opaque(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn container(raw: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Container {
            raw: raw.into(),
            args,
            annotations: Vec::new(),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque(name.into())
    }

    pub fn covariant(self) -> Self {
        Self::Covariant(Box::new(self))
    }

    /// Add an annotation. Annotations on opaque and covariant types are
    /// ignored.
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        match &mut self {
            Self::Named { annotations, .. } | Self::Container { annotations, .. } => {
                annotations.push(annotation.into());
            }
            Self::Covariant(_) | Self::Opaque(_) => {}
        }
        self
    }

    pub fn annotations(&self) -> &[String] {
        match self {
            Self::Named { annotations, .. } | Self::Container { annotations, .. } => annotations,
            Self::Covariant(_) | Self::Opaque(_) => &[],
        }
    }

    /// Strip any covariance marker.
    pub fn exact(&self) -> &TypeRef {
        let mut ty = self;
        while let Self::Covariant(inner) = ty {
            ty = inner;
        }
        ty
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in self.annotations() {
            write!(f, "@{annotation} ")?;
        }
        match self {
            Self::Named { name, .. } => write!(f, "{name}"),
            Self::Container { raw, args, .. } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            Self::Covariant(inner) => write!(f, "? extends {inner}"),
            Self::Opaque(name) => write!(f, "{name}"),
        }
    }
}

/// Name, type parameters and ordered parameter types of a method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<TypeRef>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params: Vec::new(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_params.is_empty() {
            write!(f, "<{}> ", self.type_params.join(", "))?;
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

/// What a method accesses. Two methods with the same signature but a
/// different kind are never considered the same method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Children(Cardinality),
    Field {
        name: String,
        cardinality: Cardinality,
    },
    Custom,
}

/// Regex-style quantifier of a cardinality: `?`, none, `*` or `+`.
pub(crate) fn quantifier(c: Cardinality) -> &'static str {
    match (c.multiple, c.required) {
        (false, false) => "?",
        (false, true) => "",
        (true, false) => "*",
        (true, true) => "+",
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Children(c) => write!(f, "children{}", quantifier(*c)),
            Self::Field { name, cardinality } => {
                write!(f, "field {name}{}", quantifier(*cardinality))
            }
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A method a wrapper type declares, either on its own or through promotion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMethod {
    pub kind: MethodKind,
    pub signature: Signature,
    /// `None` for methods without a return value.
    pub return_type: Option<TypeRef>,
}

/// A method declared once on an interface instead of on each subtype.
pub type PromotedMethod = GeneratedMethod;

impl GeneratedMethod {
    pub fn new(kind: MethodKind, signature: Signature, return_type: Option<TypeRef>) -> Self {
        Self {
            kind,
            signature,
            return_type,
        }
    }

    pub(crate) fn key(&self) -> MethodKey {
        MethodKey {
            signature: self.signature.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Display for GeneratedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.signature)?;
        match &self.return_type {
            Some(ty) => write!(f, "{ty}")?,
            None => write!(f, "void")?,
        }
        write!(f, " [{}]", self.kind)
    }
}

/// Identity of a method for promotion purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MethodKey {
    pub signature: Signature,
    pub kind: MethodKind,
}
