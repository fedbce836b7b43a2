//! Clause methods shared between statement kinds.
//!
//! Each macro expects the target type to have the fields it touches:
//! `table: Option<String>` for the target aliases, `predicates: Predicates`
//! for the WHERE family, and `columns`/`values` for the write list.

/// `from` / `into` / `table`: aliases setting the statement target.
macro_rules! impl_target_methods {
    ($ty:ty) => {
        impl $ty {
            /// Set the target table or FROM expression, replacing any prior one.
            ///
            /// The expression is emitted verbatim and may carry an alias
            /// (`"posts p"`).
            pub fn from(mut self, table: impl Into<String>) -> Self {
                self.table = Some(table.into());
                self
            }

            /// Alias for [`from`](Self::from).
            pub fn into(self, table: impl Into<String>) -> Self {
                self.from(table)
            }

            /// Alias for [`from`](Self::from).
            pub fn table(self, table: impl Into<String>) -> Self {
                self.from(table)
            }

            /// The current target, if set.
            pub fn target(&self) -> Option<&str> {
                self.table.as_deref()
            }
        }
    };
}

/// `where_` / `where_raw` / `and_where` / `or_where`.
macro_rules! impl_where_methods {
    ($ty:ty) => {
        impl $ty {
            /// Start a fresh WHERE clause with `expr`, discarding earlier predicates.
            ///
            /// `params` bind to the `?` placeholders in `expr`, in order. Use
            /// [`params!`](crate::params) for values of mixed types.
            pub fn where_<V: Into<$crate::Value>>(
                mut self,
                expr: &str,
                params: impl IntoIterator<Item = V>,
            ) -> Self {
                self.predicates.reset();
                self.predicates.push(
                    $crate::stmt::Connective::None,
                    expr,
                    params.into_iter().map(Into::into),
                );
                self
            }

            /// Replace the WHERE clause with verbatim fragments.
            ///
            /// Fragments are joined with a space and bind no values, so any
            /// connectives must be part of the fragments themselves.
            pub fn where_raw<S: Into<String>>(
                mut self,
                fragments: impl IntoIterator<Item = S>,
            ) -> Self {
                self.predicates.replace_raw(fragments);
                self
            }

            /// Append `and <expr>` to the WHERE clause.
            ///
            /// The connective is always emitted: start the clause with
            /// [`where_`](Self::where_), otherwise the rendered WHERE begins
            /// with a dangling `and`.
            pub fn and_where<V: Into<$crate::Value>>(
                mut self,
                expr: &str,
                params: impl IntoIterator<Item = V>,
            ) -> Self {
                self.predicates.push(
                    $crate::stmt::Connective::And,
                    expr,
                    params.into_iter().map(Into::into),
                );
                self
            }

            /// Append `or <expr>` to the WHERE clause.
            ///
            /// Like [`and_where`](Self::and_where), the connective is always emitted.
            pub fn or_where<V: Into<$crate::Value>>(
                mut self,
                expr: &str,
                params: impl IntoIterator<Item = V>,
            ) -> Self {
                self.predicates.push(
                    $crate::stmt::Connective::Or,
                    expr,
                    params.into_iter().map(Into::into),
                );
                self
            }

            /// The accumulated WHERE fragments.
            pub fn predicates(&self) -> &$crate::stmt::Predicates {
                &self.predicates
            }
        }
    };
}

/// `columns` / `values` for INSERT and UPDATE.
macro_rules! impl_write_methods {
    ($ty:ty) => {
        impl $ty {
            /// Replace the column list.
            pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
                self.columns = columns.into_iter().map(Into::into).collect();
                self
            }

            /// Append values to the write list.
            ///
            /// Repeated calls accumulate. The placeholder count follows the
            /// number of values, not the number of columns, so a mismatch is
            /// sent to the server unchanged.
            pub fn values<V: Into<$crate::Value>>(
                mut self,
                values: impl IntoIterator<Item = V>,
            ) -> Self {
                self.values.extend(values.into_iter().map(Into::into));
                self
            }

            /// Append a single value to the write list.
            pub fn value(mut self, value: impl Into<$crate::Value>) -> Self {
                self.values.push(value.into());
                self
            }
        }
    };
}

pub(crate) use impl_target_methods;
pub(crate) use impl_where_methods;
pub(crate) use impl_write_methods;
