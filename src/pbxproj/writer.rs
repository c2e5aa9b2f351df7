//! Serializes a [`Document`] in Xcode's OpenStep property-list dialect.

use std::fmt::{self, Write as _};

use crate::core::ObjectId;
use crate::pbxproj::document::{Dict, Document, Object, Value};

const HEADER: &str = "// !$*UTF8*$!";

/// Render the whole document.
pub fn to_string(doc: &Document) -> String {
    doc.to_string()
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(f, self)
    }
}

fn write_document(out: &mut impl fmt::Write, doc: &Document) -> fmt::Result {
    writeln!(out, "{}", HEADER)?;
    writeln!(out, "{{")?;
    writeln!(out, "\tarchiveVersion = {};", doc.archive_version)?;
    writeln!(out, "\tclasses = {{")?;
    writeln!(out, "\t}};")?;
    writeln!(out, "\tobjectVersion = {};", doc.object_version)?;
    writeln!(out, "\tobjects = {{")?;

    for (isa, objects) in doc.sections() {
        writeln!(out)?;
        writeln!(out, "/* Begin {} section */", isa)?;
        for object in objects {
            if isa.is_inline() {
                write_inline_object(out, doc, object)?;
            } else {
                write_object(out, doc, object)?;
            }
        }
        writeln!(out, "/* End {} section */", isa)?;
    }

    writeln!(out, "\t}};")?;
    writeln!(out, "\trootObject = {};", reference(doc, &doc.root_object))?;
    writeln!(out, "}}")
}

fn write_object(out: &mut impl fmt::Write, doc: &Document, object: &Object) -> fmt::Result {
    writeln!(out, "\t\t{} = {{", object_key(object))?;
    writeln!(out, "\t\t\tisa = {};", object.isa)?;
    for (key, value) in &object.fields {
        write!(out, "\t\t\t{} = ", quote(key))?;
        write_value(out, doc, value, 3)?;
        writeln!(out, ";")?;
    }
    writeln!(out, "\t\t}};")
}

fn write_inline_object(out: &mut impl fmt::Write, doc: &Document, object: &Object) -> fmt::Result {
    write!(out, "\t\t{} = {{isa = {}; ", object_key(object), object.isa)?;
    write_inline_fields(out, doc, &object.fields)?;
    writeln!(out, "}};")
}

fn write_inline_fields(out: &mut impl fmt::Write, doc: &Document, fields: &Dict) -> fmt::Result {
    for (key, value) in fields {
        write!(out, "{} = ", quote(key))?;
        write_inline_value(out, doc, value)?;
        write!(out, "; ")?;
    }
    Ok(())
}

fn write_value(out: &mut impl fmt::Write, doc: &Document, value: &Value, depth: usize) -> fmt::Result {
    match value {
        Value::String(s) => write!(out, "{}", quote(s)),
        Value::Ref(id) => write!(out, "{}", reference(doc, id)),
        Value::Array(items) => {
            writeln!(out, "(")?;
            for item in items {
                indent(out, depth + 1)?;
                write_value(out, doc, item, depth + 1)?;
                writeln!(out, ",")?;
            }
            indent(out, depth)?;
            write!(out, ")")
        }
        Value::Dict(dict) => {
            writeln!(out, "{{")?;
            for (key, item) in dict {
                indent(out, depth + 1)?;
                write!(out, "{} = ", quote(key))?;
                write_value(out, doc, item, depth + 1)?;
                writeln!(out, ";")?;
            }
            indent(out, depth)?;
            write!(out, "}}")
        }
    }
}

fn write_inline_value(out: &mut impl fmt::Write, doc: &Document, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => write!(out, "{}", quote(s)),
        Value::Ref(id) => write!(out, "{}", reference(doc, id)),
        Value::Array(items) => {
            write!(out, "(")?;
            for item in items {
                write_inline_value(out, doc, item)?;
                write!(out, ", ")?;
            }
            write!(out, ")")
        }
        Value::Dict(dict) => {
            write!(out, "{{")?;
            write_inline_fields(out, doc, dict)?;
            write!(out, "}}")
        }
    }
}

fn indent(out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_char('\t')?;
    }
    Ok(())
}

fn object_key(object: &Object) -> String {
    match &object.comment {
        Some(comment) => format!("{} /* {} */", object.id, sanitize_comment(comment)),
        None => object.id.to_string(),
    }
}

/// An id followed by the referenced object's comment, if it has one.
fn reference(doc: &Document, id: &ObjectId) -> String {
    match doc.comment_for(id) {
        Some(comment) => format!("{} /* {} */", id, sanitize_comment(comment)),
        None => id.to_string(),
    }
}

fn sanitize_comment(comment: &str) -> String {
    comment.replace("*/", "(*)/")
}

/// Quote a string unless it is made only of characters Xcode leaves bare.
pub fn quote(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'));
    if bare {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbxproj::document::Isa;

    #[test]
    fn test_quote_bare() {
        assert_eq!(quote("MemoryGym.app"), "MemoryGym.app");
        assert_eq!(quote("Sub/B.swift"), "Sub/B.swift");
        assert_eq!(quote("BUILT_PRODUCTS_DIR"), "BUILT_PRODUCTS_DIR");
        assert_eq!(quote("15.0"), "15.0");
    }

    #[test]
    fn test_quote_needs_quotes() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("<group>"), "\"<group>\"");
        assert_eq!(quote("Preview Content"), "\"Preview Content\"");
        assert_eq!(quote("gnu++20"), "\"gnu++20\"");
        assert_eq!(quote("-Onone"), "\"-Onone\"");
        assert_eq!(quote("$(inherited)"), "\"$(inherited)\"");
        assert_eq!(quote("1,2"), "\"1,2\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(
            quote("\"Preview Content\""),
            "\"\\\"Preview Content\\\"\""
        );
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_inline_object() {
        let mut doc = Document::new("P".into());
        doc.push(
            Object::new("B1".into(), Isa::BuildFile)
                .comment("A.swift in Sources")
                .field("fileRef", ObjectId::new("R1")),
        );
        doc.push(
            Object::new("R1".into(), Isa::FileReference)
                .comment("A.swift")
                .field("lastKnownFileType", "sourcecode.swift")
                .field("path", "A.swift")
                .field("sourceTree", "<group>"),
        );

        let out = to_string(&doc);

        assert!(out.contains(
            "\t\tB1 /* A.swift in Sources */ = {isa = PBXBuildFile; fileRef = R1 /* A.swift */; };\n"
        ));
        assert!(out.contains(
            "\t\tR1 /* A.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = A.swift; sourceTree = \"<group>\"; };\n"
        ));
    }

    #[test]
    fn test_nested_object_layout() {
        let mut doc = Document::new("G".into());
        doc.push(
            Object::new("G".into(), Isa::Group)
                .field("children", Value::refs(&[ObjectId::new("P")]))
                .field("sourceTree", "<group>"),
        );
        doc.push(
            Object::new("P".into(), Isa::Group)
                .comment("Products")
                .field("children", Value::empty_array())
                .field("name", "Products"),
        );

        let out = to_string(&doc);
        let expected = "\
\t\tG = {
\t\t\tisa = PBXGroup;
\t\t\tchildren = (
\t\t\t\tP /* Products */,
\t\t\t);
\t\t\tsourceTree = \"<group>\";
\t\t};
\t\tP /* Products */ = {
\t\t\tisa = PBXGroup;
\t\t\tchildren = (
\t\t\t);
\t\t\tname = Products;
\t\t};
";
        assert!(out.contains(expected), "unexpected layout:\n{}", out);
        assert!(out.ends_with("\trootObject = G;\n}\n"));
    }

    #[test]
    fn test_document_frame() {
        let doc = Document::new("P".into());
        let out = to_string(&doc);

        assert_eq!(
            out,
            "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 56;\n\tobjects = {\n\t};\n\trootObject = P;\n}\n"
        );
    }

    #[test]
    fn test_display_renders_the_same_text() {
        let mut doc = Document::new("P".into());
        doc.push(Object::new("P".into(), Isa::Project).comment("Project object"));

        assert_eq!(format!("{}", doc), to_string(&doc));
        assert!(format!("{}", doc).starts_with("// !$*UTF8*$!\n{\n"));
    }

    #[test]
    fn test_section_markers() {
        let mut doc = Document::new("P".into());
        doc.push(Object::new("P".into(), Isa::Project).comment("Project object"));

        let out = to_string(&doc);

        assert!(out.contains("\tobjects = {\n\n/* Begin PBXProject section */\n"));
        assert!(out.contains("/* End PBXProject section */\n\t};\n"));
        assert!(out.contains("\trootObject = P /* Project object */;\n"));
    }

    #[test]
    fn test_comment_cannot_close_early() {
        let mut doc = Document::new("P".into());
        doc.push(Object::new("R".into(), Isa::FileReference).comment("odd*/name.swift"));

        let out = to_string(&doc);
        assert!(out.contains("R /* odd(*)/name.swift */"));
    }
}
