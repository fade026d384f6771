//! Binding parameters.

use std::borrow::Cow;

use bytes::{BufMut, BytesMut};
use query_engine_sql::sql::string::Param;
use tokio_postgres::types::{to_sql_checked, Format, IsNull, ToSql, Type};

/// A parameter sent in the text format.
///
/// The server is told nothing about its type, so it reads the text as it would an
/// untyped literal in the same position. `None` is sent as NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParam<'a>(pub Option<Cow<'a, str>>);

impl<'a> From<&'a Param> for TextParam<'a> {
    fn from(param: &'a Param) -> Self {
        TextParam(param.as_text())
    }
}

impl ToSql for TextParam<'_> {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match &self.0 {
            None => Ok(IsNull::Yes),
            Some(text) => {
                out.put_slice(text.as_bytes());
                Ok(IsNull::No)
            }
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

/// Text parameters for a list of parameters, in order.
pub fn text_params(params: &[Param]) -> Vec<TextParam<'_>> {
    params.iter().map(TextParam::from).collect()
}
