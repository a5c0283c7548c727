//! Type formatting for debugging and lowering dumps.

use keel_stack::ensure_sufficient_stack;

use crate::{Idx, Pool, Tag};

impl Pool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, buf: &mut String) {
        if idx.is_none() {
            buf.push_str("<none>");
            return;
        }
        ensure_sufficient_stack(|| self.format_nested(idx, buf));
    }

    fn format_nested(&self, idx: Idx, buf: &mut String) {
        match self.tag(idx) {
            Tag::NativeObject | Tag::UnknownObject | Tag::RawPointer | Tag::Word => {
                buf.push_str(idx.name().unwrap_or("<builtin>"));
            }
            Tag::Int => {
                buf.push_str("Builtin.Int");
                buf.push_str(&self.int_width(idx).to_string());
            }
            Tag::Float => {
                buf.push_str("Builtin.");
                buf.push_str(self.float_kind(idx).name());
            }
            Tag::Tuple => {
                buf.push('(');
                self.format_list_into(&self.tuple_elems(idx), buf);
                buf.push(')');
            }
            Tag::Nominal => {
                buf.push_str(&self.decl_name(self.nominal_decl(idx)));
                let args = self.nominal_args(idx);
                if !args.is_empty() {
                    buf.push('<');
                    self.format_list_into(&args, buf);
                    buf.push('>');
                }
            }
            Tag::Function => {
                let generics = self.function_generic_params(idx);
                if generics > 0 {
                    buf.push('<');
                    for i in 0..generics {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        buf.push_str("τ_");
                        buf.push_str(&i.to_string());
                    }
                    buf.push_str("> ");
                }
                buf.push('(');
                self.format_list_into(&self.function_params(idx), buf);
                buf.push_str(") -> ");
                self.format_type_into(self.function_result(idx), buf);
            }
            Tag::Metatype => {
                self.format_type_into(self.metatype_instance(idx), buf);
                buf.push_str(".Type");
            }
            Tag::GenericParam => {
                buf.push_str("τ_");
                buf.push_str(&self.generic_param_index(idx).to_string());
                if self.generic_param_is_class_bound(idx) {
                    buf.push_str(": AnyObject");
                }
            }
        }
    }

    fn format_list_into(&self, types: &[Idx], buf: &mut String) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.format_type_into(ty, buf);
        }
    }
}
