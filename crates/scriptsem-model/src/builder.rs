//! Programmatic `TypeGraph` construction.
//!
//! Declarations are plain values with chaining setters; `GraphBuilder` assigns
//! ids and derives everything the upstream type checker would normally supply
//! implicitly:
//! - full names and type parameter lists of nested types,
//! - implicit `abstract` on interface members,
//! - accessor methods for properties and events, inheriting staticness,
//!   override/implementation links and (by default) accessibility.
//!
//! # Example
//!
//! ```
//! use scriptsem_model::{GraphBuilder, MethodDecl, TypeDecl};
//!
//! let mut builder = GraphBuilder::new();
//! let asm = builder.assembly("App");
//! let class = builder.add_type(asm, TypeDecl::class("App", "Widget"));
//! builder.add_method(class, MethodDecl::new("Render").param("depth", "System.Int32"));
//! let graph = builder.build();
//! assert_eq!(graph.type_symbol(class).full_name, "App.Widget");
//! ```

use crate::attributes::Attribute;
use crate::graph::TypeGraph;
use crate::ids::{AssemblyId, MemberId, TypeId};
use crate::symbols::{
    Accessibility, EventData, MemberKind, MemberModifiers, MemberSymbol, MethodData, Parameter,
    PropertyData, TypeKind, TypeSymbol,
};
use tracing::trace;

const DEFAULT_MEMBER_TYPE: &str = "System.Object";

// =============================================================================
// Declarations
// =============================================================================

/// Declaration of a type.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub is_static: bool,
    /// Type parameters declared by this type itself.
    pub type_parameters: Vec<String>,
    pub declaring_type: Option<TypeId>,
    pub base_types: Vec<TypeId>,
    pub attributes: Vec<Attribute>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, namespace: &str, name: &str) -> Self {
        TypeDecl {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            accessibility: Accessibility::Public,
            is_static: false,
            type_parameters: Vec::new(),
            declaring_type: None,
            base_types: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Class, namespace, name)
    }

    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(TypeKind::Interface, namespace, name)
    }

    /// A class nested in `declaring_type`; the namespace is taken from the container.
    pub fn nested(declaring_type: TypeId, name: &str) -> Self {
        let mut decl = Self::new(TypeKind::Class, "", name);
        decl.declaring_type = Some(declaring_type);
        decl
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn internal(self) -> Self {
        self.accessibility(Accessibility::Internal)
    }

    pub fn private(self) -> Self {
        self.accessibility(Accessibility::Private)
    }

    pub fn static_type(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn type_params(mut self, names: &[&str]) -> Self {
        self.type_parameters
            .extend(names.iter().map(|n| (*n).to_string()));
        self
    }

    pub fn base(mut self, base: TypeId) -> Self {
        self.base_types.push(base);
        self
    }

    pub fn attr(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Declaration of an accessor method's own data.
#[derive(Clone, Debug, Default)]
pub struct AccessorDecl {
    /// `None` inherits the owning member's accessibility.
    pub accessibility: Option<Accessibility>,
    pub attributes: Vec<Attribute>,
}

/// Setters shared by all member declarations.
macro_rules! member_decl_common {
    ($decl:ty) => {
        impl $decl {
            pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
                self.accessibility = accessibility;
                self
            }

            pub fn private(self) -> Self {
                self.accessibility(Accessibility::Private)
            }

            pub fn internal(self) -> Self {
                self.accessibility(Accessibility::Internal)
            }

            pub fn protected(self) -> Self {
                self.accessibility(Accessibility::Protected)
            }

            pub fn static_(mut self) -> Self {
                self.modifiers |= MemberModifiers::STATIC;
                self
            }

            pub fn attr(mut self, attribute: Attribute) -> Self {
                self.attributes.push(attribute);
                self
            }
        }
    };
}

/// Setters shared by overridable members.
macro_rules! overridable_decl_common {
    ($decl:ty) => {
        impl $decl {
            pub fn virtual_(mut self) -> Self {
                self.modifiers |= MemberModifiers::VIRTUAL;
                self
            }

            pub fn abstract_(mut self) -> Self {
                self.modifiers |= MemberModifiers::ABSTRACT;
                self
            }

            pub fn sealed(mut self) -> Self {
                self.modifiers |= MemberModifiers::SEALED;
                self
            }

            /// Mark as `override` of `base`.
            pub fn override_of(mut self, base: MemberId) -> Self {
                self.modifiers |= MemberModifiers::OVERRIDE;
                self.overrides = Some(base);
                self
            }

            pub fn implements(mut self, interface_member: MemberId) -> Self {
                self.implements.push(interface_member);
                self
            }
        }
    };
}

/// Declaration of a method.
#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: String,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<String>,
    pub overrides: Option<MemberId>,
    pub implements: Vec<MemberId>,
    pub attributes: Vec<Attribute>,
}

impl MethodDecl {
    pub fn new(name: &str) -> Self {
        MethodDecl {
            name: name.to_string(),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            overrides: None,
            implements: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, type_name: &str) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn type_param(mut self, name: &str) -> Self {
        self.type_parameters.push(name.to_string());
        self
    }
}

member_decl_common!(MethodDecl);
overridable_decl_common!(MethodDecl);

/// Declaration of a property or indexer.
#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub name: String,
    pub type_name: String,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    pub parameters: Vec<Parameter>,
    pub getter: Option<AccessorDecl>,
    pub setter: Option<AccessorDecl>,
    pub overrides: Option<MemberId>,
    pub implements: Vec<MemberId>,
    pub attributes: Vec<Attribute>,
}

impl PropertyDecl {
    /// A read-write property.
    pub fn new(name: &str) -> Self {
        PropertyDecl {
            name: name.to_string(),
            type_name: DEFAULT_MEMBER_TYPE.to_string(),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            parameters: Vec::new(),
            getter: Some(AccessorDecl::default()),
            setter: Some(AccessorDecl::default()),
            overrides: None,
            implements: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// A read-write indexer (`this[...]`), named `Item`.
    pub fn indexer(params: &[(&str, &str)]) -> Self {
        let mut decl = Self::new("Item");
        decl.parameters = params
            .iter()
            .map(|(name, ty)| Parameter::new(*name, *ty))
            .collect();
        decl
    }

    pub fn of_type(mut self, type_name: &str) -> Self {
        self.type_name = type_name.to_string();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.setter = None;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.getter = None;
        self
    }

    pub fn getter_attr(mut self, attribute: Attribute) -> Self {
        self.getter
            .get_or_insert_with(AccessorDecl::default)
            .attributes
            .push(attribute);
        self
    }

    pub fn setter_attr(mut self, attribute: Attribute) -> Self {
        self.setter
            .get_or_insert_with(AccessorDecl::default)
            .attributes
            .push(attribute);
        self
    }

    pub fn getter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.getter.get_or_insert_with(AccessorDecl::default).accessibility = Some(accessibility);
        self
    }

    pub fn setter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.setter.get_or_insert_with(AccessorDecl::default).accessibility = Some(accessibility);
        self
    }
}

member_decl_common!(PropertyDecl);
overridable_decl_common!(PropertyDecl);

/// Declaration of a field.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: String,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    pub attributes: Vec<Attribute>,
}

impl FieldDecl {
    pub fn new(name: &str) -> Self {
        FieldDecl {
            name: name.to_string(),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            attributes: Vec::new(),
        }
    }
}

member_decl_common!(FieldDecl);

/// Declaration of an event.
#[derive(Clone, Debug)]
pub struct EventDecl {
    pub name: String,
    pub type_name: String,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    pub adder: AccessorDecl,
    pub remover: AccessorDecl,
    pub overrides: Option<MemberId>,
    pub implements: Vec<MemberId>,
    pub attributes: Vec<Attribute>,
}

impl EventDecl {
    pub fn new(name: &str) -> Self {
        EventDecl {
            name: name.to_string(),
            type_name: DEFAULT_MEMBER_TYPE.to_string(),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            adder: AccessorDecl::default(),
            remover: AccessorDecl::default(),
            overrides: None,
            implements: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn of_type(mut self, type_name: &str) -> Self {
        self.type_name = type_name.to_string();
        self
    }

    pub fn adder_attr(mut self, attribute: Attribute) -> Self {
        self.adder.attributes.push(attribute);
        self
    }

    pub fn remover_attr(mut self, attribute: Attribute) -> Self {
        self.remover.attributes.push(attribute);
        self
    }
}

member_decl_common!(EventDecl);
overridable_decl_common!(EventDecl);

// =============================================================================
// GraphBuilder
// =============================================================================

/// Which accessor of a property or event is being synthesized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AccessorSlot {
    Getter,
    Setter,
    Adder,
    Remover,
}

impl AccessorSlot {
    fn prefix(self) -> &'static str {
        match self {
            AccessorSlot::Getter => "get_",
            AccessorSlot::Setter => "set_",
            AccessorSlot::Adder => "add_",
            AccessorSlot::Remover => "remove_",
        }
    }
}

/// Data an accessor inherits from its owning property or event.
struct AccessorOwner<'a> {
    id: MemberId,
    name: &'a str,
    declaring_type: TypeId,
    accessibility: Accessibility,
    modifiers: MemberModifiers,
    overrides: Option<MemberId>,
    implements: &'a [MemberId],
    parameters: Vec<Parameter>,
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: TypeGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            graph: TypeGraph::default(),
        }
    }

    /// Get or create the assembly named `name`.
    pub fn assembly(&mut self, name: &str) -> AssemblyId {
        if let Some(id) = self.graph.assembly_by_name(name) {
            return id;
        }
        self.graph.assemblies.push(name.to_string());
        AssemblyId((self.graph.assemblies.len() - 1) as u32)
    }

    /// Read access to the graph built so far.
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn add_type(&mut self, assembly: AssemblyId, decl: TypeDecl) -> TypeId {
        let id = TypeId(self.graph.types.len() as u32);

        let (namespace, full_name, mut type_parameters) = match decl.declaring_type {
            Some(declaring) => {
                let outer = self.graph.type_symbol(declaring);
                (
                    outer.namespace.clone(),
                    format!("{}.{}", outer.full_name, decl.name),
                    outer.type_parameters.clone(),
                )
            }
            None => {
                let full_name = if decl.namespace.is_empty() {
                    decl.name.clone()
                } else {
                    format!("{}.{}", decl.namespace, decl.name)
                };
                (decl.namespace.clone(), full_name, Vec::new())
            }
        };
        type_parameters.extend(decl.type_parameters);

        trace!(type_id = id.0, full_name = %full_name, "add type");
        self.graph.type_by_full_name.insert(full_name.clone(), id);
        self.graph.types.push(TypeSymbol {
            id,
            name: decl.name,
            namespace,
            full_name,
            kind: decl.kind,
            accessibility: decl.accessibility,
            is_static: decl.is_static,
            assembly,
            type_parameters,
            declaring_type: decl.declaring_type,
            base_types: decl.base_types,
            members: Vec::new(),
            attributes: decl.attributes,
        });
        id
    }

    pub fn add_method(&mut self, type_id: TypeId, decl: MethodDecl) -> MemberId {
        let modifiers = self.effective_modifiers(type_id, decl.modifiers);
        let id = self.push_member(MemberSymbol {
            id: MemberId(0),
            name: decl.name,
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers,
            overridden: decl.overrides,
            implements: decl.implements,
            attributes: decl.attributes,
            kind: MemberKind::Method(MethodData {
                parameters: decl.parameters,
                type_parameters: decl.type_parameters,
                accessor_of: None,
            }),
        });
        self.graph.types[type_id.index()].members.push(id);
        id
    }

    pub fn add_property(&mut self, type_id: TypeId, decl: PropertyDecl) -> MemberId {
        let modifiers = self.effective_modifiers(type_id, decl.modifiers);
        let id = self.push_member(MemberSymbol {
            id: MemberId(0),
            name: decl.name.clone(),
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers,
            overridden: decl.overrides,
            implements: decl.implements.clone(),
            attributes: decl.attributes,
            kind: MemberKind::Property(PropertyData {
                parameters: decl.parameters.clone(),
                getter: None,
                setter: None,
            }),
        });
        self.graph.types[type_id.index()].members.push(id);

        let owner = AccessorOwner {
            id,
            name: &decl.name,
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers,
            overrides: decl.overrides,
            implements: &decl.implements,
            parameters: decl.parameters.clone(),
        };
        let getter = decl
            .getter
            .map(|acc| self.add_accessor(&owner, AccessorSlot::Getter, acc, None));
        let setter = decl.setter.map(|acc| {
            self.add_accessor(
                &owner,
                AccessorSlot::Setter,
                acc,
                Some(Parameter::new("value", &decl.type_name)),
            )
        });

        if let MemberKind::Property(data) = &mut self.graph.members[id.index()].kind {
            data.getter = getter;
            data.setter = setter;
        }
        id
    }

    pub fn add_field(&mut self, type_id: TypeId, decl: FieldDecl) -> MemberId {
        let id = self.push_member(MemberSymbol {
            id: MemberId(0),
            name: decl.name,
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers: decl.modifiers,
            overridden: None,
            implements: Vec::new(),
            attributes: decl.attributes,
            kind: MemberKind::Field,
        });
        self.graph.types[type_id.index()].members.push(id);
        id
    }

    pub fn add_event(&mut self, type_id: TypeId, decl: EventDecl) -> MemberId {
        let modifiers = self.effective_modifiers(type_id, decl.modifiers);
        let id = self.push_member(MemberSymbol {
            id: MemberId(0),
            name: decl.name.clone(),
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers,
            overridden: decl.overrides,
            implements: decl.implements.clone(),
            attributes: decl.attributes,
            kind: MemberKind::Event(EventData::default()),
        });
        self.graph.types[type_id.index()].members.push(id);

        let owner = AccessorOwner {
            id,
            name: &decl.name,
            declaring_type: type_id,
            accessibility: decl.accessibility,
            modifiers,
            overrides: decl.overrides,
            implements: &decl.implements,
            parameters: Vec::new(),
        };
        let handler = Parameter::new("value", &decl.type_name);
        let adder = self.add_accessor(
            &owner,
            AccessorSlot::Adder,
            decl.adder,
            Some(handler.clone()),
        );
        let remover = self.add_accessor(&owner, AccessorSlot::Remover, decl.remover, Some(handler));

        if let MemberKind::Event(data) = &mut self.graph.members[id.index()].kind {
            data.adder = Some(adder);
            data.remover = Some(remover);
        }
        id
    }

    pub fn build(self) -> TypeGraph {
        self.graph
    }

    fn effective_modifiers(&self, type_id: TypeId, modifiers: MemberModifiers) -> MemberModifiers {
        if self.graph.type_symbol(type_id).is_interface() {
            modifiers | MemberModifiers::ABSTRACT
        } else {
            modifiers
        }
    }

    fn push_member(&mut self, mut member: MemberSymbol) -> MemberId {
        let id = MemberId(self.graph.members.len() as u32);
        member.id = id;
        self.graph.members.push(member);
        id
    }

    /// The accessor in `slot` of another property or event, used to link
    /// accessor overrides and implementations.
    fn accessor_in_slot(&self, owner: MemberId, slot: AccessorSlot) -> Option<MemberId> {
        match slot {
            AccessorSlot::Getter => self.graph.getter(owner),
            AccessorSlot::Setter => self.graph.setter(owner),
            AccessorSlot::Adder => self.graph.adder(owner),
            AccessorSlot::Remover => self.graph.remover(owner),
        }
    }

    fn add_accessor(
        &mut self,
        owner: &AccessorOwner<'_>,
        slot: AccessorSlot,
        decl: AccessorDecl,
        extra_parameter: Option<Parameter>,
    ) -> MemberId {
        let mut parameters = owner.parameters.clone();
        parameters.extend(extra_parameter);

        let overridden = owner
            .overrides
            .and_then(|base| self.accessor_in_slot(base, slot));
        let implements = owner
            .implements
            .iter()
            .filter_map(|&im| self.accessor_in_slot(im, slot))
            .collect();

        self.push_member(MemberSymbol {
            id: MemberId(0),
            name: format!("{}{}", slot.prefix(), owner.name),
            declaring_type: owner.declaring_type,
            accessibility: decl.accessibility.unwrap_or(owner.accessibility),
            modifiers: owner.modifiers,
            overridden,
            implements,
            attributes: decl.attributes,
            kind: MemberKind::Method(MethodData {
                parameters,
                type_parameters: Vec::new(),
                accessor_of: Some(owner.id),
            }),
        })
    }
}
