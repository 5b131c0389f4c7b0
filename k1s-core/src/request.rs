//! Endpoint descriptors and request building.
//!
//! Every API operation is described once, statically, by an [`Endpoint`]:
//! its HTTP method, a path template with `{placeholder}` segments, and the
//! set of status codes that count as success. The descriptor renders into an
//! [`http::Request`] which a transport then submits verbatim.
use http::{header, Method};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

// RFC 3986: everything outside `pchar` must be escaped within one segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'\\');

/// Possible errors when building a request from a descriptor
#[derive(Debug, Error)]
pub enum Error {
    /// A path template placeholder had no matching parameter.
    ///
    /// This is a programming error at the call site, not a runtime failure.
    #[error("unresolved placeholder {0:?} in endpoint path")]
    UnresolvedPlaceholder(String),

    /// Http based error
    #[error("HttpError: {0}")]
    Http(#[source] http::Error),
}

/// Static metadata describing one API operation's HTTP shape.
///
/// Descriptors are defined once in the [`ops`] table and shared across calls;
/// the request and response payload types are supplied by the caller at the
/// dispatch site.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// The HTTP method to submit with
    pub method: Method,
    /// Path template, relative to the API base path
    pub path: &'static str,
    /// Status codes treated as success for this operation
    pub success: &'static [u16],
}

impl Endpoint {
    /// Substitute `{name}` placeholders in the path template.
    ///
    /// Substituted values are percent-encoded as single path segments, so an
    /// id containing `/` or `?` cannot change the request's shape. Fails
    /// with [`Error::UnresolvedPlaceholder`] if the template names a
    /// parameter that was not supplied.
    pub fn render(&self, path_params: &[(&str, &str)]) -> Result<String, Error> {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| Error::UnresolvedPlaceholder(after.into()))?;
            let name = &after[..end];
            match path_params.iter().find(|(k, _)| *k == name) {
                Some((_, value)) => out.extend(utf8_percent_encode(value, PATH_SEGMENT)),
                None => return Err(Error::UnresolvedPlaceholder(name.into())),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Build the concrete [`http::Request`] for this operation.
    ///
    /// The body, when present, is assumed to be JSON produced by the
    /// [`codec`][crate::codec].
    pub fn request(
        &self,
        path_params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let path = self.render(path_params)?;
        let urlstr = if query.is_empty() {
            path
        } else {
            let mut qp = form_urlencoded::Serializer::new(format!("{path}?"));
            for (k, v) in query {
                qp.append_pair(k, v);
            }
            qp.finish()
        };
        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(urlstr)
            .header(header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        builder.body(body.unwrap_or_default()).map_err(Error::Http)
    }

    /// Whether `code` is in this operation's success set
    pub fn accepts(&self, code: u16) -> bool {
        self.success.contains(&code)
    }
}

/// The four collection operations every resource kind supports.
///
/// Bound to a model type through [`Resource::ENDPOINTS`][crate::Resource].
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Create a new instance
    pub create: &'static Endpoint,
    /// Fetch a single instance by id
    pub get: &'static Endpoint,
    /// Enumerate the collection
    pub list: &'static Endpoint,
    /// Delete a single instance by id
    pub delete: &'static Endpoint,
}

/// The operation table for the v1beta1 endpoint surface.
///
/// Paths are relative to the configured base (e.g. `/api/v1beta1`).
pub mod ops {
    use super::Endpoint;
    use http::Method;

    /// Create a pod
    pub const CREATE_POD: Endpoint = Endpoint {
        method: Method::POST,
        path: "/pods",
        success: &[200, 201, 202],
    };
    /// Fetch a pod by id
    pub const GET_POD: Endpoint = Endpoint {
        method: Method::GET,
        path: "/pods/{id}",
        success: &[200],
    };
    /// Enumerate pods
    pub const LIST_PODS: Endpoint = Endpoint {
        method: Method::GET,
        path: "/pods",
        success: &[200],
    };
    /// Delete a pod by id
    pub const DELETE_POD: Endpoint = Endpoint {
        method: Method::DELETE,
        path: "/pods/{id}",
        success: &[200, 202],
    };

    /// Create a replication controller
    pub const CREATE_REPLICATION_CONTROLLER: Endpoint = Endpoint {
        method: Method::POST,
        path: "/replicationControllers",
        success: &[200, 201, 202],
    };
    /// Fetch a replication controller by id
    pub const GET_REPLICATION_CONTROLLER: Endpoint = Endpoint {
        method: Method::GET,
        path: "/replicationControllers/{id}",
        success: &[200],
    };
    /// Enumerate replication controllers
    pub const LIST_REPLICATION_CONTROLLERS: Endpoint = Endpoint {
        method: Method::GET,
        path: "/replicationControllers",
        success: &[200],
    };
    /// Delete a replication controller by id
    pub const DELETE_REPLICATION_CONTROLLER: Endpoint = Endpoint {
        method: Method::DELETE,
        path: "/replicationControllers/{id}",
        success: &[200, 202],
    };
    /// Replace a replication controller, carrying its new desired state
    pub const UPDATE_REPLICATION_CONTROLLER: Endpoint = Endpoint {
        method: Method::PUT,
        path: "/replicationControllers/{id}",
        success: &[200],
    };

    /// Create a service
    pub const CREATE_SERVICE: Endpoint = Endpoint {
        method: Method::POST,
        path: "/services",
        success: &[200, 201, 202],
    };
    /// Fetch a service by id
    pub const GET_SERVICE: Endpoint = Endpoint {
        method: Method::GET,
        path: "/services/{id}",
        success: &[200],
    };
    /// Enumerate services
    pub const LIST_SERVICES: Endpoint = Endpoint {
        method: Method::GET,
        path: "/services",
        success: &[200],
    };
    /// Delete a service by id
    pub const DELETE_SERVICE: Endpoint = Endpoint {
        method: Method::DELETE,
        path: "/services/{id}",
        success: &[200, 202],
    };
}

#[cfg(test)]
mod tests {
    use super::{ops, Error};

    #[test]
    fn renders_path_placeholders() {
        let path = ops::GET_POD.render(&[("id", "kubernetes-test-pod")]).unwrap();
        assert_eq!(path, "/pods/kubernetes-test-pod");
    }

    #[test]
    fn path_parameters_are_encoded_as_one_segment() {
        let path = ops::GET_POD.render(&[("id", "a/b c?x")]).unwrap();
        assert_eq!(path, "/pods/a%2Fb%20c%3Fx");
        // an id cannot splice extra path segments into the request
        let req = ops::DELETE_POD
            .request(&[("id", "../replicationControllers/x")], &[], None)
            .unwrap();
        assert_eq!(req.uri().path(), "/pods/..%2FreplicationControllers%2Fx");
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let err = ops::DELETE_POD.render(&[("name", "x")]).unwrap_err();
        assert!(matches!(err, Error::UnresolvedPlaceholder(p) if p == "id"));
    }

    #[test]
    fn builds_a_get_request_without_body() {
        let req = ops::GET_SERVICE.request(&[("id", "frontend")], &[], None).unwrap();
        assert_eq!(req.method(), http::Method::GET);
        assert_eq!(req.uri().to_string(), "/services/frontend");
        assert!(req.headers().get(http::header::CONTENT_TYPE).is_none());
        assert!(req.body().is_empty());
    }

    #[test]
    fn builds_a_list_request_with_label_query() {
        let req = ops::LIST_PODS
            .request(&[], &[("labels", "name=frontend,env=prod")], None)
            .unwrap();
        assert_eq!(req.uri().to_string(), "/pods?labels=name%3Dfrontend%2Cenv%3Dprod");
    }

    #[test]
    fn create_requests_carry_a_json_content_type() {
        let req = ops::CREATE_POD.request(&[], &[], Some(b"{}".to_vec())).unwrap();
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(
            req.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn success_sets_are_consulted_exactly() {
        assert!(ops::CREATE_POD.accepts(202));
        assert!(!ops::GET_POD.accepts(404));
        assert!(!ops::GET_POD.accepts(204));
    }
}
