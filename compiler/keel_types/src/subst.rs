//! Generic substitution.
//!
//! A [`SubstitutionList`] binds generic parameter indices to concrete types.
//! The pool applies it structurally, re-interning every rebuilt type, and
//! skips any subtree whose flags show it mentions no generic parameter.
//!
//! Indices are relative to binders: inside a function that binds `g`
//! parameters, indices `0..g` name its own parameters and index `g + j`
//! names free parameter `j` of the enclosing context.

use keel_stack::ensure_sufficient_stack;

use crate::{Idx, Pool, Tag};

/// One binding of a generic parameter to a replacement type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Substitution {
    /// Index of the generic parameter being replaced.
    pub param: u32,
    pub replacement: Idx,
}

/// Ordered generic parameter bindings.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SubstitutionList {
    subs: Vec<Substitution>,
}

impl SubstitutionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind parameters `0..args.len()` to `args`, in order.
    pub fn from_args(args: &[Idx]) -> Self {
        args.iter()
            .zip(0u32..)
            .map(|(&replacement, param)| Substitution { param, replacement })
            .collect()
    }

    pub fn push(&mut self, param: u32, replacement: Idx) {
        self.subs.push(Substitution { param, replacement });
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substitution> {
        self.subs.iter()
    }

    /// Replacement bound to `param`, if any.
    pub fn lookup(&self, param: u32) -> Option<Idx> {
        self.subs
            .iter()
            .find(|sub| sub.param == param)
            .map(|sub| sub.replacement)
    }

    /// Replacement types in binding order.
    pub fn replacements(&self) -> Vec<Idx> {
        self.subs.iter().map(|sub| sub.replacement).collect()
    }
}

impl FromIterator<Substitution> for SubstitutionList {
    fn from_iter<I: IntoIterator<Item = Substitution>>(iter: I) -> Self {
        Self {
            subs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SubstitutionList {
    type Item = &'a Substitution;
    type IntoIter = std::slice::Iter<'a, Substitution>;

    fn into_iter(self) -> Self::IntoIter {
        self.subs.iter()
    }
}

impl Pool {
    /// Replace generic parameters in `ty` according to `subs`.
    ///
    /// Parameters without a binding are left in place. Parameters bound by a
    /// polymorphic function inside `ty` are never replaced; see
    /// [`Pool::generic_function`] for how indices are counted under a binder.
    pub fn substitute(&self, ty: Idx, subs: &SubstitutionList) -> Idx {
        if subs.is_empty() {
            return ty;
        }
        self.rewrite_params(ty, 0, &|param| subs.lookup(param), 0)
    }

    /// Rebuild `ty` with its free generic parameters rewritten.
    ///
    /// `depth` is the number of parameters bound by functions enclosing the
    /// current position. A parameter with index `i < depth` is bound there
    /// and kept. Otherwise its free index `j = i - depth` is looked up in
    /// `replace`; a replacement is shifted past the `depth` enclosing
    /// binders, and an unreplaced parameter is renumbered to `i - lower`
    /// (`lower` counts binders being removed, `0` for plain substitution).
    fn rewrite_params(
        &self,
        ty: Idx,
        depth: u32,
        replace: &impl Fn(u32) -> Option<Idx>,
        lower: u32,
    ) -> Idx {
        if !self.has_generic_param(ty) {
            return ty;
        }

        ensure_sufficient_stack(|| match self.tag(ty) {
            Tag::GenericParam => {
                let index = self.generic_param_index(ty);
                if index < depth {
                    return ty;
                }
                let free = index - depth;
                match replace(free) {
                    Some(replacement) => self.shift_params(replacement, depth, 0),
                    None if free >= lower => self.renumber_param(ty, index - lower),
                    None => ty,
                }
            }
            Tag::Tuple => {
                let elems = self.rewrite_all(&self.tuple_elems(ty), depth, replace, lower);
                self.tuple(&elems)
            }
            Tag::Nominal => {
                let args = self.rewrite_all(&self.nominal_args(ty), depth, replace, lower);
                self.nominal(self.nominal_decl(ty), &args)
            }
            Tag::Function => {
                let generics = self.function_generic_params(ty);
                let inner = depth + generics;
                let params = self.rewrite_all(&self.function_params(ty), inner, replace, lower);
                let ret = self.rewrite_params(self.function_result(ty), inner, replace, lower);
                self.generic_function(generics, &params, ret)
            }
            Tag::Metatype => {
                let instance = self.rewrite_params(self.metatype_instance(ty), depth, replace, lower);
                self.metatype(instance)
            }
            // Built-ins never mention generic parameters.
            Tag::NativeObject
            | Tag::UnknownObject
            | Tag::RawPointer
            | Tag::Word
            | Tag::Float
            | Tag::Int => ty,
        })
    }

    fn rewrite_all(
        &self,
        types: &[Idx],
        depth: u32,
        replace: &impl Fn(u32) -> Option<Idx>,
        lower: u32,
    ) -> Vec<Idx> {
        types
            .iter()
            .map(|&t| self.rewrite_params(t, depth, replace, lower))
            .collect()
    }

    /// Raise every free parameter of `ty` (index `>= cutoff`) by `amount`,
    /// so a type written outside `amount` binders can be placed under them.
    fn shift_params(&self, ty: Idx, amount: u32, cutoff: u32) -> Idx {
        if amount == 0 || !self.has_generic_param(ty) {
            return ty;
        }

        ensure_sufficient_stack(|| match self.tag(ty) {
            Tag::GenericParam => {
                let index = self.generic_param_index(ty);
                if index < cutoff {
                    ty
                } else {
                    self.renumber_param(ty, index + amount)
                }
            }
            Tag::Tuple => {
                let elems = self.shift_all(&self.tuple_elems(ty), amount, cutoff);
                self.tuple(&elems)
            }
            Tag::Nominal => {
                let args = self.shift_all(&self.nominal_args(ty), amount, cutoff);
                self.nominal(self.nominal_decl(ty), &args)
            }
            Tag::Function => {
                let generics = self.function_generic_params(ty);
                let inner = cutoff + generics;
                let params = self.shift_all(&self.function_params(ty), amount, inner);
                let ret = self.shift_params(self.function_result(ty), amount, inner);
                self.generic_function(generics, &params, ret)
            }
            Tag::Metatype => {
                let instance = self.shift_params(self.metatype_instance(ty), amount, cutoff);
                self.metatype(instance)
            }
            Tag::NativeObject
            | Tag::UnknownObject
            | Tag::RawPointer
            | Tag::Word
            | Tag::Float
            | Tag::Int => ty,
        })
    }

    fn shift_all(&self, types: &[Idx], amount: u32, cutoff: u32) -> Vec<Idx> {
        types
            .iter()
            .map(|&t| self.shift_params(t, amount, cutoff))
            .collect()
    }

    /// The parameter `param` with a new index and the same constraint.
    fn renumber_param(&self, param: Idx, index: u32) -> Idx {
        if self.generic_param_is_class_bound(param) {
            self.class_bound_param(index)
        } else {
            self.generic_param(index)
        }
    }

    /// The substitutions bound by a nominal instance's generic arguments.
    ///
    /// Empty for non-nominal and non-generic types.
    pub fn gather_substitutions(&self, ty: Idx) -> SubstitutionList {
        if self.tag(ty) != Tag::Nominal {
            return SubstitutionList::new();
        }
        SubstitutionList::from_args(&self.nominal_args(ty))
    }

    /// Specialize a member's declared type for the generic arguments bound in
    /// `base`, a nominal instance of the member's owner.
    pub fn member_type(&self, base: Idx, member_ty: Idx) -> Idx {
        let subs = self.gather_substitutions(base);
        self.substitute(member_ty, &subs)
    }

    /// Close a polymorphic function type over `subs`.
    ///
    /// Every parameter the function binds must have exactly one replacement.
    /// Parameters the function leaves free are renumbered to account for the
    /// removed binder.
    pub fn specialize_function(&self, fn_ty: Idx, subs: &SubstitutionList) -> Idx {
        let generics = self.function_generic_params(fn_ty);
        debug_assert_eq!(
            generics as usize,
            subs.len(),
            "substitution arity mismatch for {}",
            self.format_type(fn_ty),
        );
        debug_assert!(
            (0..generics).all(|param| subs.lookup(param).is_some()),
            "missing substitution for {}",
            self.format_type(fn_ty),
        );

        let own = |param: u32| {
            if param < generics {
                subs.lookup(param)
            } else {
                None
            }
        };
        let params = self.rewrite_all(&self.function_params(fn_ty), 0, &own, generics);
        let ret = self.rewrite_params(self.function_result(fn_ty), 0, &own, generics);
        let specialized = self.function(&params, ret);
        tracing::debug!(
            from = %self.format_type(fn_ty),
            to = %self.format_type(specialized),
            "specialized function type"
        );
        specialized
    }
}

#[cfg(test)]
mod tests;
