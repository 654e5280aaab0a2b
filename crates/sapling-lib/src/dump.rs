//! Text rendering of a derived model, for inspection and snapshot tests.
//!
//! Sections come in a fixed order (`[types]`, `[unions]`, `[tokens]`), empty
//! ones omitted, and list entries in declaration order, so equal models
//! render identically.

use std::fmt::{self, Write};

use crate::generate::Model;
use crate::graph::{InterfaceId, ResolvedSlot, SlotType, TypeKey};
use crate::promote::{GeneratedMethod, quantifier};

/// Printer for [`Model`].
pub struct ModelPrinter<'a> {
    model: &'a Model,
    methods: bool,
}

impl<'a> ModelPrinter<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self {
            model,
            methods: true,
        }
    }

    /// Include own and promoted methods (default: true).
    pub fn with_methods(mut self, methods: bool) -> Self {
        self.methods = methods;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        self.format_types(w)?;
        self.format_unions(w)?;
        self.format_tokens(w)
    }

    fn format_types(&self, w: &mut impl Write) -> fmt::Result {
        let graph = self.model.graph();
        writeln!(w, "[types]")?;
        for (id, node) in graph.nodes() {
            write!(w, "{} {:?}", node.ident, node.name)?;
            if node.is_supertype() {
                write!(w, " supertype")?;
            }
            if node.root {
                write!(w, " root")?;
            }
            if node.extra {
                write!(w, " extra")?;
            }
            writeln!(w)?;

            for &subtype in graph.subtypes(id).unwrap_or_default() {
                writeln!(w, "  subtype {}", graph.node(subtype).ident)?;
            }
            if let Ok(Some(structure)) = graph.structure(id) {
                for slot in structure.slots() {
                    self.format_slot(w, slot)?;
                }
            }
            self.format_supertypes(w, TypeKey::Node(id))?;
            if self.methods {
                self.format_methods(w, "method", self.model.own_methods(id))?;
                if node.is_supertype() {
                    let promoted = self.model.promoted(InterfaceId::Supertype(id));
                    self.format_methods(w, "promoted", promoted)?;
                }
            }
        }
        Ok(())
    }

    fn format_unions(&self, w: &mut impl Write) -> fmt::Result {
        let graph = self.model.graph();
        if graph.unions().next().is_none() {
            return Ok(());
        }
        writeln!(w, "\n[unions]")?;
        for (id, union) in graph.unions() {
            writeln!(w, "{} {}", union.qualified, placement(union.hoisted))?;
            for &member in &union.members {
                writeln!(w, "  member {}", graph.node(member).ident)?;
            }
            if let Some(tokens) = union.tokens {
                writeln!(w, "  member {}", graph.token_enum(tokens).qualified)?;
            }
            if self.methods {
                self.format_methods(w, "promoted", self.model.promoted(InterfaceId::Union(id)))?;
            }
        }
        Ok(())
    }

    fn format_tokens(&self, w: &mut impl Write) -> fmt::Result {
        let graph = self.model.graph();
        if graph.token_enums().next().is_none() {
            return Ok(());
        }
        writeln!(w, "\n[tokens]")?;
        for (id, tokens) in graph.token_enums() {
            writeln!(w, "{} {}", tokens.qualified, placement(tokens.hoisted))?;
            for variant in &tokens.variants {
                writeln!(w, "  {} {:?}", variant.ident, variant.text)?;
            }
            self.format_supertypes(w, TypeKey::Tokens(id))?;
        }
        Ok(())
    }

    fn format_slot(&self, w: &mut impl Write, slot: &ResolvedSlot) -> fmt::Result {
        let graph = self.model.graph();
        let target = graph.qualified_ident(TypeKey::from(slot.slot_type));
        let kind = match slot.slot_type {
            SlotType::Node(_) => "",
            SlotType::Tokens(_) => " (tokens)",
            SlotType::Union(_) => " (union)",
        };
        let q = quantifier(slot.cardinality);
        match &slot.field {
            None => writeln!(w, "  children{q}: {target}{kind}"),
            Some(field) => writeln!(w, "  field {field}{q}: {target}{kind}"),
        }
    }

    fn format_supertypes(&self, w: &mut impl Write, key: TypeKey) -> fmt::Result {
        let supertypes = self.model.supertypes(key);
        if supertypes.is_empty() {
            return Ok(());
        }
        let graph = self.model.graph();
        write!(w, "  supertypes:")?;
        for &supertype in supertypes {
            write!(w, " {}", graph.qualified_ident(supertype))?;
        }
        writeln!(w)
    }

    fn format_methods(
        &self,
        w: &mut impl Write,
        label: &str,
        methods: &[GeneratedMethod],
    ) -> fmt::Result {
        for method in methods {
            writeln!(w, "  {label} {method}")?;
        }
        Ok(())
    }
}

fn placement(hoisted: bool) -> &'static str {
    if hoisted { "hoisted" } else { "nested" }
}

/// Renders `model` with methods.
pub fn dump(model: &Model) -> String {
    ModelPrinter::new(model).dump()
}
