//! Field plumbing shared by the typed indicator outputs.

/// Implement [`FieldAccess`](qta_core::FieldAccess) and the conversion into
/// [`IndicatorResult`](qta_core::IndicatorResult) for an output struct whose
/// fields are all `Series<T>`. Field order is the declared order.
macro_rules! output_fields {
    ($output:ident { $($field:ident),+ $(,)? }) => {
        impl<T: qta_core::TaFloat> qta_core::FieldAccess<T> for $output<T> {
            fn field(&self, name: &str) -> qta_core::Result<&qta_core::Series<T>> {
                $(
                    if name == stringify!($field) {
                        return Ok(&self.$field);
                    }
                )+
                Err(qta_core::IndicatorError::FieldNotFound(name.to_string()))
            }

            fn field_names(&self) -> Vec<&str> {
                vec![$(stringify!($field)),+]
            }

            fn len(&self) -> usize {
                [$(self.$field.len()),+][0]
            }
        }

        impl<T: qta_core::TaFloat> From<$output<T>> for qta_core::IndicatorResult<T> {
            fn from(output: $output<T>) -> Self {
                qta_core::DataSeries::aligned([$((stringify!($field), output.$field)),+])
            }
        }
    };
}

pub(crate) use output_fields;
