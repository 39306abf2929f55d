// Test utility module for gridfn integration tests
#![allow(dead_code)]

use gridfn::ast::{
    DocComment, DocTag, EnumDecl, EnumMember, FunctionDecl, Item, KeywordType, MemberValue,
    ParamDecl, SourceModule, TypeNode,
};

pub fn module(items: Vec<Item>) -> SourceModule {
    SourceModule {
        path: "functions.ts".into(),
        items,
    }
}

pub fn doc(text: &str, tags: &[(&str, &str)]) -> DocComment {
    DocComment {
        text: text.to_string(),
        tags: tags
            .iter()
            .map(|(name, comment)| DocTag {
                name: name.to_string(),
                comment: comment.to_string(),
                position: None,
            })
            .collect(),
    }
}

/// Doc comment carrying a bare `@customfunction` tag plus the given
/// extra tags.
pub fn custom_function_doc(text: &str, extra: &[(&str, &str)]) -> DocComment {
    let mut tags = vec![("customfunction", "")];
    tags.extend_from_slice(extra);
    doc(text, &tags)
}

pub fn function(name: &str, doc: Option<DocComment>, parameters: Vec<ParamDecl>) -> Item {
    Item::Function(FunctionDecl {
        name: name.to_string(),
        doc,
        parameters,
        return_type: None,
        position: None,
    })
}

pub fn function_returning(
    name: &str,
    doc: Option<DocComment>,
    parameters: Vec<ParamDecl>,
    return_type: TypeNode,
) -> Item {
    Item::Function(FunctionDecl {
        name: name.to_string(),
        doc,
        parameters,
        return_type: Some(return_type),
        position: None,
    })
}

pub fn param(name: &str, type_node: Option<TypeNode>) -> ParamDecl {
    ParamDecl {
        name: name.to_string(),
        type_node,
        optional: false,
        has_default: false,
        position: None,
    }
}

pub fn enum_decl(name: &str, doc: Option<DocComment>, members: Vec<EnumMember>) -> Item {
    Item::Enum(EnumDecl {
        name: name.to_string(),
        doc,
        members,
        position: None,
    })
}

pub fn member(name: &str, value: Option<MemberValue>) -> EnumMember {
    EnumMember {
        name: name.to_string(),
        value,
        doc: None,
        position: None,
    }
}

pub fn member_with_tooltip(name: &str, value: Option<MemberValue>, tooltip: &str) -> EnumMember {
    EnumMember {
        name: name.to_string(),
        value,
        doc: Some(tooltip.to_string()),
        position: None,
    }
}

pub fn number() -> TypeNode {
    TypeNode::Keyword(KeywordType::Number)
}

pub fn string() -> TypeNode {
    TypeNode::Keyword(KeywordType::String)
}

pub fn boolean() -> TypeNode {
    TypeNode::Keyword(KeywordType::Boolean)
}

pub fn array(inner: TypeNode) -> TypeNode {
    TypeNode::Array(Box::new(inner))
}

pub fn generic(name: &str, args: Vec<TypeNode>) -> TypeNode {
    TypeNode::Reference {
        name: name.to_string(),
        type_args: args,
    }
}
