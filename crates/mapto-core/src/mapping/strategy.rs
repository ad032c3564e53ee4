use crate::schema::{Member, Schema, TypeDef, TypeKind};

/// How the members of a kind of type are enumerated
#[derive(Clone, Copy)]
pub(crate) struct Strategy {
    /// Lists mappable members. The flag restricts the list to members
    /// declared on the type itself.
    pub members: for<'a> fn(&'a Schema, &'a TypeDef, bool) -> Vec<&'a Member>,

    /// The kind can inherit members from a mapped base type
    pub inherits: bool,
}

const CLASS: Strategy = Strategy {
    members: class_members,
    inherits: true,
};

const STRUCT: Strategy = Strategy {
    members: declared_members,
    inherits: false,
};

const RECORD: Strategy = Strategy {
    members: record_members,
    inherits: false,
};

const INTERFACE: Strategy = Strategy {
    members: declared_members,
    inherits: false,
};

impl Strategy {
    pub(crate) fn of(kind: TypeKind) -> Strategy {
        match kind {
            TypeKind::Class => CLASS,
            TypeKind::Struct => STRUCT,
            TypeKind::Record => RECORD,
            TypeKind::Interface => INTERFACE,
        }
    }

    pub(crate) fn members<'a>(
        &self,
        schema: &'a Schema,
        def: &'a TypeDef,
        declared_only: bool,
    ) -> Vec<&'a Member> {
        (self.members)(schema, def, declared_only)
    }
}

fn class_members<'a>(schema: &'a Schema, def: &'a TypeDef, declared_only: bool) -> Vec<&'a Member> {
    schema.members(def, declared_only)
}

fn declared_members<'a>(_: &'a Schema, def: &'a TypeDef, _: bool) -> Vec<&'a Member> {
    def.members.iter().collect()
}

/// Records are described by the parameters of their widest constructor
fn record_members<'a>(_: &'a Schema, def: &'a TypeDef, _: bool) -> Vec<&'a Member> {
    match def.widest_constructor() {
        Some(ctor) => ctor.params.iter().collect(),
        None => def.members.iter().collect(),
    }
}
