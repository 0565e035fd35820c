use serde::ser::Error as _;
use serde::Serialize;
use serde_json::Value;

/// Parameters for methods that take none. Serializes to `null`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoParams;

/// Flatten a parameter struct into query pairs.
///
/// `null` fields are dropped, strings go through as-is, numbers and booleans
/// use their JSON text, and arrays and objects are JSON-encoded. Pairs come
/// out sorted by key.
pub fn to_query<P>(params: &P) -> Result<Vec<(String, String)>, serde_json::Error>
where
    P: Serialize + ?Sized,
{
    let fields = match serde_json::to_value(params)? {
        Value::Null => return Ok(Vec::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(serde_json::Error::custom(format!(
                "method parameters must serialize to an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
        };
        pairs.push((key, text));
    }
    Ok(pairs)
}

/// Declare a method parameter struct.
///
/// Fields in the first block are required and become arguments of `new`.
/// Fields in the `optional` block are stored as `Option`, left out of the
/// request when unset, and get a chained setter of the same name.
macro_rules! params {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$req_attr:meta])* $req:ident : $req_ty:ty ),* $(,)?
        } optional {
            $( $(#[$opt_attr:meta])* $opt:ident : $opt_ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $name {
            $(
                $(#[$req_attr])*
                pub $req: $req_ty,
            )*
            $(
                $(#[$opt_attr])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $opt: Option<$opt_ty>,
            )*
        }

        impl $name {
            #[allow(clippy::new_without_default, clippy::too_many_arguments)]
            pub fn new($( $req: impl Into<$req_ty> ),*) -> Self {
                Self {
                    $( $req: $req.into(), )*
                    $( $opt: None, )*
                }
            }

            $(
                pub fn $opt(mut self, value: impl Into<$opt_ty>) -> Self {
                    self.$opt = Some(value.into());
                    self
                }
            )*
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$req_attr:meta])* $req:ident : $req_ty:ty ),* $(,)?
        }
    ) => {
        params! {
            $(#[$meta])*
            $name {
                $( $(#[$req_attr])* $req: $req_ty ),*
            } optional {}
        }
    };
}

/// Generate one async method on [`Api`](crate::api::Api) per remote
/// operation from a `fn name("remoteName", Params) -> Output;` table.
macro_rules! api_methods {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident($remote:literal $(, $params:ty)?) -> $ret:ty;
        )*
    ) => {
        impl $crate::api::Api {
            $(
                api_methods!(@method [$(#[$meta])*] $name $remote [$($params)?] $ret);
            )*
        }
    };
    (@method [$(#[$meta:meta])*] $name:ident $remote:literal [] $ret:ty) => {
        $(#[$meta])*
        pub async fn $name(&self) -> Result<$ret, $crate::api::ApiError> {
            self.call($remote, &$crate::api::NoParams).await
        }
    };
    (@method [$(#[$meta:meta])*] $name:ident $remote:literal [$params:ty] $ret:ty) => {
        $(#[$meta])*
        pub async fn $name(&self, params: &$params) -> Result<$ret, $crate::api::ApiError> {
            self.call($remote, params).await
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    params! {
        Sample {
            chat_id: i64,
            text: String,
        } optional {
            tags: Vec<String>,
            silent: bool,
            #[serde(rename = "type")]
            kind: String,
        }
    }

    fn as_map(pairs: Vec<(String, String)>) -> std::collections::HashMap<String, String> {
        pairs.into_iter().collect()
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let pairs = to_query(&Sample::new(7i64, "hi")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("chat_id".to_string(), "7".to_string()),
                ("text".to_string(), "hi".to_string()),
            ]
        );
    }

    #[test]
    fn test_scalars_and_nested_values() {
        let params = Sample::new(-100i64, "a b&c")
            .tags(vec!["x".to_string(), "y".to_string()])
            .silent(true)
            .kind("quiz");
        let query = as_map(to_query(&params).unwrap());

        assert_eq!(query["chat_id"], "-100");
        assert_eq!(query["text"], "a b&c");
        assert_eq!(query["silent"], "true");
        assert_eq!(query["type"], "quiz");
        let tags: Value = serde_json::from_str(&query["tags"]).unwrap();
        assert_eq!(tags, json!(["x", "y"]));
    }

    #[test]
    fn test_empty_string_is_kept() {
        let params = Sample::new(1i64, "");
        let query = as_map(to_query(&params).unwrap());
        assert_eq!(query["text"], "");
    }

    #[test]
    fn test_no_params_is_empty() {
        assert!(to_query(&NoParams).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(to_query(&vec![1, 2]).is_err());
    }
}
