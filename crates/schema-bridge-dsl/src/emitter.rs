use schema_bridge_core::types::{AttributeDef, ClassDef};

/// Emit a single class definition as DSL text.
///
/// The output uses 2-space indentation and re-parses to the same class.
pub fn emit_class(class: &ClassDef) -> String {
    let mut output = String::new();
    emit_block(class, &mut output);
    output
}

/// Emit class definitions in order, separated by blank lines.
///
/// No trailing newline follows the last block; an empty slice emits an
/// empty string.
pub fn emit(classes: &[ClassDef]) -> String {
    let mut output = String::new();
    for (i, class) in classes.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        emit_block(class, &mut output);
    }
    output
}

fn emit_block(class: &ClassDef, output: &mut String) {
    output.push_str("class ");
    output.push_str(class.name.as_str());
    output.push_str(" {\n");

    for attribute in &class.attributes {
        output.push_str("  ");
        emit_attribute(attribute, output);
        output.push('\n');
    }

    output.push('}');
}

fn emit_attribute(attribute: &AttributeDef, output: &mut String) {
    output.push_str(attribute.name.as_str());
    output.push_str(" : ");
    output.push_str(attribute.type_name.as_str());
    output.push(';');
}
