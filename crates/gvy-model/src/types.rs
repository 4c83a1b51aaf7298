//! Class store.
//!
//! All resolvable type entities live in one arena, referenced by `ClassId`.
//! Well-known sentinel types (Object, Void, Boolean, String, Closure, Class,
//! Pattern, Integer, Null, the numeric family) are pre-registered with fixed
//! ids, mirroring how the solver pre-registers its intrinsic types. The store
//! is built up front by the host and read-only during resolution.

use crate::binding::MethodBinding;
use crate::interner::{Atom, Interner};
use crate::member::{
    FieldData, FieldId, MemberFlags, MethodData, MethodId, MethodOrigin, ParamInfo, PropertyData,
    PropertyId,
};
use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Index of a class entity in the [`TypeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const OBJECT: ClassId = ClassId(0);
    pub const VOID: ClassId = ClassId(1);
    pub const BOOLEAN: ClassId = ClassId(2);
    pub const STRING: ClassId = ClassId(3);
    pub const GSTRING: ClassId = ClassId(4);
    pub const CLOSURE: ClassId = ClassId(5);
    pub const CLASS: ClassId = ClassId(6);
    pub const PATTERN: ClassId = ClassId(7);
    pub const INTEGER: ClassId = ClassId(8);
    /// Type of the `null` literal.
    pub const NULL: ClassId = ClassId(9);
    pub const BYTE: ClassId = ClassId(10);
    pub const SHORT: ClassId = ClassId(11);
    pub const LONG: ClassId = ClassId(12);
    pub const FLOAT: ClassId = ClassId(13);
    pub const DOUBLE: ClassId = ClassId(14);
    pub const CHARACTER: ClassId = ClassId(15);
    pub const BIG_DECIMAL: ClassId = ClassId(16);
    pub const BIG_INTEGER: ClassId = ClassId(17);
    pub const INT_PRIM: ClassId = ClassId(18);
    pub const BOOLEAN_PRIM: ClassId = ClassId(19);
    pub const LONG_PRIM: ClassId = ClassId(20);
    pub const SHORT_PRIM: ClassId = ClassId(21);
    pub const BYTE_PRIM: ClassId = ClassId(22);
    pub const FLOAT_PRIM: ClassId = ClassId(23);
    pub const DOUBLE_PRIM: ClassId = ClassId(24);
    pub const CHAR_PRIM: ClassId = ClassId(25);

    const SENTINEL_COUNT: usize = 26;
}

/// A type reference: a class plus any generic arguments known at the
/// reference site. Most references carry no arguments; `Class<T>` carries
/// exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub class: ClassId,
    pub args: SmallVec<[ClassId; 1]>,
}

impl TypeRef {
    pub fn of(class: ClassId) -> Self {
        Self {
            class,
            args: SmallVec::new(),
        }
    }

    pub fn with_args(class: ClassId, args: impl IntoIterator<Item = ClassId>) -> Self {
        Self {
            class,
            args: args.into_iter().collect(),
        }
    }

    pub fn is(&self, class: ClassId) -> bool {
        self.class == class
    }
}

impl From<ClassId> for TypeRef {
    fn from(class: ClassId) -> Self {
        TypeRef::of(class)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassFlags: u8 {
        const INTERFACE = 1 << 0;
        const ABSTRACT  = 1 << 1;
        const PRIMITIVE = 1 << 2;
        const ARRAY     = 1 << 3;
        /// Script class: its run body allows dynamic variables.
        const SCRIPT    = 1 << 4;
        /// Anonymous inner class; resolves as its supertype.
        const ANONYMOUS = 1 << 5;
    }
}

#[derive(Debug)]
pub struct ClassData {
    pub name: Atom,
    pub flags: ClassFlags,
    pub super_class: Option<ClassId>,
    /// Declared interfaces, in declaration order.
    pub interfaces: Vec<ClassId>,
    pub fields: Vec<FieldId>,
    pub properties: Vec<PropertyId>,
    pub methods: Vec<MethodId>,
    pub constructors: Vec<MethodId>,
    /// Component type, for array classes.
    pub component: Option<ClassId>,
}

impl ClassData {
    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags
            .intersects(ClassFlags::ABSTRACT | ClassFlags::INTERFACE)
    }

    pub fn is_array(&self) -> bool {
        self.flags.contains(ClassFlags::ARRAY)
    }

    pub fn is_primitive(&self) -> bool {
        self.flags.contains(ClassFlags::PRIMITIVE)
    }

    pub fn is_script(&self) -> bool {
        self.flags.contains(ClassFlags::SCRIPT)
    }
}

/// Well-known name atoms, interned once at store construction.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownNames {
    pub length: Atom,
    pub call: Atom,
    pub this_kw: Atom,
    pub super_kw: Atom,
}

/// Arena of classes and their members.
pub struct TypeStore {
    names: Interner,
    wk: WellKnownNames,
    classes: Vec<ClassData>,
    fields: Vec<FieldData>,
    properties: Vec<PropertyData>,
    methods: Vec<MethodData>,
    arrays_by_component: FxHashMap<ClassId, ClassId>,
}

impl TypeStore {
    pub fn new() -> Self {
        let names = Interner::new();
        let wk = WellKnownNames {
            length: names.intern("length"),
            call: names.intern("call"),
            this_kw: names.intern("this"),
            super_kw: names.intern("super"),
        };
        let mut store = Self {
            names,
            wk,
            classes: Vec::with_capacity(ClassId::SENTINEL_COUNT),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            arrays_by_component: FxHashMap::default(),
        };
        store.register_sentinels();
        store.register_sentinel_members();
        store
    }

    fn register_sentinels(&mut self) {
        let reference = ClassFlags::empty();
        let primitive = ClassFlags::PRIMITIVE;
        let sentinels: [(&str, ClassFlags); ClassId::SENTINEL_COUNT] = [
            ("java.lang.Object", reference),
            ("void", primitive),
            ("java.lang.Boolean", reference),
            ("java.lang.String", reference),
            ("groovy.lang.GString", reference),
            ("groovy.lang.Closure", reference),
            ("java.lang.Class", reference),
            ("java.util.regex.Pattern", reference),
            ("java.lang.Integer", reference),
            ("null", reference),
            ("java.lang.Byte", reference),
            ("java.lang.Short", reference),
            ("java.lang.Long", reference),
            ("java.lang.Float", reference),
            ("java.lang.Double", reference),
            ("java.lang.Character", reference),
            ("java.math.BigDecimal", reference),
            ("java.math.BigInteger", reference),
            ("int", primitive),
            ("boolean", primitive),
            ("long", primitive),
            ("short", primitive),
            ("byte", primitive),
            ("float", primitive),
            ("double", primitive),
            ("char", primitive),
        ];
        for (name, flags) in sentinels {
            let name = self.names.intern(name);
            let super_class = if flags.contains(ClassFlags::PRIMITIVE) || self.classes.is_empty() {
                None
            } else {
                Some(ClassId::OBJECT)
            };
            self.classes.push(ClassData {
                name,
                flags,
                super_class,
                interfaces: Vec::new(),
                fields: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
                component: None,
            });
        }
    }

    /// Minimal member surface for the sentinel types the resolver consults
    /// directly: Object's universal methods, Class's reflective accessors,
    /// and Closure's `call`.
    fn register_sentinel_members(&mut self) {
        self.add_method(
            ClassId::OBJECT,
            "equals",
            ClassId::BOOLEAN_PRIM,
            &[("obj", ClassId::OBJECT)],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::OBJECT,
            "hashCode",
            ClassId::INT_PRIM,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::OBJECT,
            "toString",
            ClassId::STRING,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::OBJECT,
            "getClass",
            ClassId::CLASS,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::CLASS,
            "getName",
            ClassId::STRING,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::CLASS,
            "getSimpleName",
            ClassId::STRING,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::CLASS,
            "isInterface",
            ClassId::BOOLEAN_PRIM,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::CLASS,
            "forName",
            ClassId::CLASS,
            &[("name", ClassId::STRING)],
            MemberFlags::STATIC,
        );
        self.add_method(
            ClassId::CLOSURE,
            "call",
            ClassId::OBJECT,
            &[],
            MemberFlags::empty(),
        );
        self.add_method(
            ClassId::CLOSURE,
            "call",
            ClassId::OBJECT,
            &[("args", ClassId::OBJECT)],
            MemberFlags::empty(),
        );
    }

    pub fn names(&self) -> &Interner {
        &self.names
    }

    pub fn well_known(&self) -> &WellKnownNames {
        &self.wk
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    pub fn add_class(&mut self, name: &str, flags: ClassFlags) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassData {
            name: self.names.intern(name),
            flags,
            super_class: (!flags.contains(ClassFlags::PRIMITIVE)).then_some(ClassId::OBJECT),
            interfaces: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            component: None,
        });
        id
    }

    pub fn set_super_class(&mut self, class: ClassId, super_class: ClassId) {
        self.classes[class.0 as usize].super_class = Some(super_class);
    }

    pub fn add_interface_to(&mut self, class: ClassId, interface: ClassId) {
        self.classes[class.0 as usize].interfaces.push(interface);
    }

    pub fn add_field(
        &mut self,
        class: ClassId,
        name: &str,
        ty: ClassId,
        flags: MemberFlags,
    ) -> FieldId {
        self.add_field_with_initializer(class, name, ty, flags, None)
    }

    pub fn add_field_with_initializer(
        &mut self,
        class: ClassId,
        name: &str,
        ty: ClassId,
        flags: MemberFlags,
        initializer_ty: Option<ClassId>,
    ) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(FieldData {
            name: self.names.intern(name),
            declaring: class,
            ty,
            flags,
            initializer_ty,
        });
        self.classes[class.0 as usize].fields.push(id);
        id
    }

    /// Adds a property along with its backing field.
    pub fn add_property(
        &mut self,
        class: ClassId,
        name: &str,
        ty: ClassId,
        flags: MemberFlags,
    ) -> PropertyId {
        let backing = self.add_field(class, name, ty, flags);
        let id = PropertyId(self.properties.len() as u32);
        self.properties.push(PropertyData {
            name: self.names.intern(name),
            declaring: class,
            ty,
            flags,
            field: Some(backing),
        });
        self.classes[class.0 as usize].properties.push(id);
        id
    }

    /// Adds a property with no backing field (e.g. one projected from an
    /// accessor pair in a binary dependency).
    pub fn add_unbacked_property(
        &mut self,
        class: ClassId,
        name: &str,
        ty: ClassId,
        flags: MemberFlags,
    ) -> PropertyId {
        let id = PropertyId(self.properties.len() as u32);
        self.properties.push(PropertyData {
            name: self.names.intern(name),
            declaring: class,
            ty,
            flags,
            field: None,
        });
        self.classes[class.0 as usize].properties.push(id);
        id
    }

    pub fn add_method(
        &mut self,
        class: ClassId,
        name: &str,
        return_ty: ClassId,
        params: &[(&str, ClassId)],
        flags: MemberFlags,
    ) -> MethodId {
        self.push_method(class, name, return_ty, params, flags, MethodOrigin::Source)
    }

    pub fn add_method_from_binding(
        &mut self,
        class: ClassId,
        name: &str,
        return_ty: ClassId,
        params: &[(&str, ClassId)],
        flags: MemberFlags,
        binding: MethodBinding,
    ) -> MethodId {
        self.push_method(
            class,
            name,
            return_ty,
            params,
            flags,
            MethodOrigin::Binding(crate::binding::BoundMethodNode::new(binding)),
        )
    }

    fn push_method(
        &mut self,
        class: ClassId,
        name: &str,
        return_ty: ClassId,
        params: &[(&str, ClassId)],
        flags: MemberFlags,
        origin: MethodOrigin,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodData {
            name: self.names.intern(name),
            declaring: class,
            return_ty,
            params: params
                .iter()
                .map(|&(name, ty)| ParamInfo {
                    name: self.names.intern(name),
                    ty,
                })
                .collect(),
            flags,
            is_constructor: false,
            origin,
        });
        self.classes[class.0 as usize].methods.push(id);
        id
    }

    pub fn add_constructor(
        &mut self,
        class: ClassId,
        params: &[(&str, ClassId)],
        flags: MemberFlags,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodData {
            name: self.names.intern("<init>"),
            declaring: class,
            return_ty: class,
            params: params
                .iter()
                .map(|&(name, ty)| ParamInfo {
                    name: self.names.intern(name),
                    ty,
                })
                .collect(),
            flags,
            is_constructor: true,
            origin: MethodOrigin::Source,
        });
        self.classes[class.0 as usize].constructors.push(id);
        id
    }

    /// The array class for `component`, created on first request. Array
    /// classes declare exactly one member: the synthetic `length` field.
    /// This is the only way to create an array class; consumers that find
    /// `ClassFlags::ARRAY` set may rely on the field being present.
    pub fn array_of(&mut self, component: ClassId) -> ClassId {
        if let Some(&existing) = self.arrays_by_component.get(&component) {
            return existing;
        }
        let name = format!("{}[]", self.names.resolve(self.classes[component.0 as usize].name));
        let id = self.add_class(&name, ClassFlags::ARRAY);
        self.classes[id.0 as usize].component = Some(component);
        self.add_field(
            id,
            "length",
            ClassId::INT_PRIM,
            MemberFlags::SYNTHETIC | MemberFlags::FINAL,
        );
        self.arrays_by_component.insert(component, id);
        id
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn class(&self, id: ClassId) -> &ClassData {
        &self.classes[id.0 as usize]
    }

    pub fn field(&self, id: FieldId) -> &FieldData {
        &self.fields[id.0 as usize]
    }

    pub fn property(&self, id: PropertyId) -> &PropertyData {
        &self.properties[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodData {
        &self.methods[id.0 as usize]
    }

    pub fn class_name(&self, id: ClassId) -> String {
        self.names.resolve(self.class(id).name)
    }

    /// Methods with the given name declared directly on `class`.
    pub fn declared_methods_named(&self, class: ClassId, name: Atom) -> Vec<MethodId> {
        self.class(class)
            .methods
            .iter()
            .copied()
            .filter(|&m| self.method(m).name == name)
            .collect()
    }

    /// Methods with the given name on `class` and its superclass chain, in
    /// declaration order starting from `class` itself. This is the "all
    /// methods" view a concrete class answers; interfaces only answer their
    /// own declarations (callers must union the interface closure).
    pub fn methods_named(&self, class: ClassId, name: Atom) -> Vec<MethodId> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(class);
        while let Some(c) = current {
            if !seen.insert(c) {
                break;
            }
            out.extend(
                self.class(c)
                    .methods
                    .iter()
                    .copied()
                    .filter(|&m| self.method(m).name == name),
            );
            current = self.class(c).super_class;
        }
        out
    }

    pub fn declared_property(&self, class: ClassId, name: Atom) -> Option<PropertyId> {
        self.class(class)
            .properties
            .iter()
            .copied()
            .find(|&p| self.property(p).name == name)
    }

    /// Direct field lookup on the class itself, no hierarchy walk.
    pub fn declared_field(&self, class: ClassId, name: Atom) -> Option<FieldId> {
        self.class(class)
            .fields
            .iter()
            .copied()
            .find(|&f| self.field(f).name == name)
    }

    pub fn constructors_of(&self, class: ClassId) -> &[MethodId] {
        &self.class(class).constructors
    }

    /// Boxes a primitive type to its wrapper; identity for everything else.
    pub fn box_primitive(&self, class: ClassId) -> ClassId {
        match class {
            ClassId::INT_PRIM => ClassId::INTEGER,
            ClassId::BOOLEAN_PRIM => ClassId::BOOLEAN,
            ClassId::LONG_PRIM => ClassId::LONG,
            ClassId::SHORT_PRIM => ClassId::SHORT,
            ClassId::BYTE_PRIM => ClassId::BYTE,
            ClassId::FLOAT_PRIM => ClassId::FLOAT,
            ClassId::DOUBLE_PRIM => ClassId::DOUBLE,
            ClassId::CHAR_PRIM => ClassId::CHARACTER,
            _ => class,
        }
    }

    /// The numeric family: integral and floating primitives and wrappers.
    /// BigDecimal/BigInteger are handled separately by the evaluator.
    pub fn is_number_type(&self, class: ClassId) -> bool {
        matches!(
            self.box_primitive(class),
            ClassId::INTEGER
                | ClassId::LONG
                | ClassId::SHORT
                | ClassId::BYTE
                | ClassId::FLOAT
                | ClassId::DOUBLE
                | ClassId::CHARACTER
        )
    }

    /// Single-abstract-method shape: an interface with exactly one declared
    /// method across its interface closure.
    pub fn is_sam_type(&self, class: ClassId) -> bool {
        if !self.class(class).is_interface() {
            return false;
        }
        let mut count = self.class(class).methods.len();
        let mut stack: Vec<ClassId> = self.class(class).interfaces.clone();
        let mut seen = FxHashSet::default();
        seen.insert(class);
        while let Some(face) = stack.pop() {
            if !seen.insert(face) {
                continue;
            }
            count += self.class(face).methods.len();
            stack.extend(self.class(face).interfaces.iter().copied());
        }
        count == 1
    }

    /// Best-effort assignability between the model's classes: identity,
    /// null-to-reference, boxing, supertype/interface walk, and mutual
    /// numeric-family coercion. Intentionally simpler than a real type
    /// checker; the resolver treats a positive answer as fuzzy anyway.
    pub fn is_assignable(&self, source: ClassId, target: ClassId) -> bool {
        if source == target {
            return true;
        }
        if source == ClassId::NULL {
            return !self.class(target).is_primitive();
        }
        let source = self.box_primitive(source);
        let target = self.box_primitive(target);
        if source == target || target == ClassId::OBJECT {
            return true;
        }
        if self.is_number_type(source) && self.is_number_type(target) {
            return true;
        }
        // walk the supertype graph of source looking for target
        let mut stack = vec![source];
        let mut seen = FxHashSet::default();
        while let Some(c) = stack.pop() {
            if !seen.insert(c) {
                continue;
            }
            if c == target {
                return true;
            }
            let data = self.class(c);
            if let Some(s) = data.super_class {
                stack.push(s);
            }
            stack.extend(data.interfaces.iter().copied());
        }
        false
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
