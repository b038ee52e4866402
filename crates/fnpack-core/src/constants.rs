//! Names and lookup tables shared by the analyser and the function runtime.
//!
//! Annotation and field names here must match the public API of the
//! functions package exactly; the runtime bridge reads the same values when
//! marshaling requests.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Organisation that publishes the functions package.
pub const PACKAGE_ORG: &str = "ballerinax";
/// Name of the functions package.
pub const PACKAGE_NAME: &str = "azure_functions";
/// Key under which the runtime stores the service object.
pub const SERVICE_OBJECT: &str = "AZURE_FUNCTION_SERVICE_OBJECT";

/// Trigger annotation placed on a service or its listener.
pub const HTTP_TRIGGER: &str = "HttpTrigger";
/// Annotation marking the parameter that receives the request payload.
pub const PAYLOAD_ANNOTATION: &str = "Payload";

/// `HttpTrigger` field selecting the authorization level.
pub const AUTH_LEVEL: &str = "authLevel";
/// `QueueOutput` field naming the target queue.
pub const QUEUE_NAME: &str = "queueName";
/// Output binding field naming the storage connection setting.
pub const CONNECTION: &str = "connection";
/// `BlobOutput` field holding the blob path.
pub const PATH: &str = "path";
/// `CosmosDBOutput` field naming the database.
pub const DATABASE_NAME: &str = "databaseName";
/// `CosmosDBOutput` field naming the collection.
pub const COLLECTION_NAME: &str = "collectionName";
/// `CosmosDBOutput` field naming the connection string setting.
pub const CONNECTION_STRING_SETTING: &str = "connectionStringSetting";

/// Connection setting used when a storage binding names none.
pub const DEFAULT_CONNECTION: &str = "AzureWebJobsStorage";
/// Connection string setting used when a Cosmos DB binding names none.
pub const DEFAULT_COSMOS_CONNECTION: &str = "CosmosDBConnection";

/// Binding name of the HTTP trigger input.
pub const HTTP_PAYLOAD: &str = "httpPayload";
/// Binding name of non-HTTP outputs.
pub const OUT_MSG: &str = "outMsg";
/// Binding name of the HTTP response output.
pub const RESP: &str = "resp";

/// Response object field names read by the runtime bridge.
pub mod response {
    /// Status record field.
    pub const STATUS: &str = "status";
    /// Status code field inside the status record.
    pub const CODE: &str = "code";
    /// Status code field of the serialized response.
    pub const STATUS_CODE: &str = "statusCode";
    /// Body field.
    pub const BODY: &str = "body";
    /// Headers field.
    pub const HEADERS: &str = "headers";
    /// Content type header name.
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Media type override field.
    pub const MEDIA_TYPE: &str = "mediaType";
}

/// `200 OK`.
pub const OK_200: &str = "200";
/// `201 Created`.
pub const CREATED_201: &str = "201";

/// `text/plain`.
pub const TEXT_PLAIN: &str = "text/plain";
/// `application/xml`.
pub const APPLICATION_XML: &str = "application/xml";
/// `application/octet-stream`.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
/// `application/json`.
pub const APPLICATION_JSON: &str = "application/json";

/// Returns the media type the runtime uses for a payload of the named type.
///
/// `byte` payloads are binary, `xml` payloads are XML, structured payloads
/// (`map`, `json`, `table`, `record`) are JSON, and anything else is plain
/// text.
///
/// # Example
///
/// ```
/// use fnpack_core::constants::{APPLICATION_JSON, default_media_type};
///
/// assert_eq!(default_media_type("map"), APPLICATION_JSON);
/// ```
#[must_use]
pub fn default_media_type(type_name: &str) -> &'static str {
    match type_name {
        "byte" => APPLICATION_OCTET_STREAM,
        "xml" => APPLICATION_XML,
        "map" | "json" | "table" | "record" => APPLICATION_JSON,
        _ => TEXT_PLAIN,
    }
}

/// HTTP methods a resource accessor may name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
    /// `head`
    Head,
    /// `options`
    Options,
    /// `default`: matches every method.
    Default,
}

impl HttpMethod {
    /// Returns the lowercase method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns `true` for the catch-all accessor.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns the status code a successful response carries when the
    /// function does not set one.
    #[must_use]
    pub const fn default_status_code(self) -> &'static str {
        match self {
            Self::Post => CREATED_201,
            _ => OK_200,
        }
    }
}

/// Authorization level of an HTTP trigger.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthLevel {
    /// No key required.
    #[default]
    Anonymous,
    /// Function key required.
    Function,
    /// Master key required.
    Admin,
}

impl AuthLevel {
    /// Accepted spellings, for diagnostics.
    pub const ALLOWED: [&'static str; 3] = ["anonymous", "function", "admin"];
}

/// Output binding annotations recognised on a resource's return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
pub enum OutputBindingKind {
    /// HTTP response.
    #[strum(serialize = "HttpOutput")]
    Http,
    /// Storage queue message.
    #[strum(serialize = "QueueOutput")]
    Queue,
    /// Storage blob.
    #[strum(serialize = "BlobOutput")]
    Blob,
    /// Cosmos DB document.
    #[strum(serialize = "CosmosDBOutput")]
    CosmosDb,
}

impl OutputBindingKind {
    /// Maps an annotation name to a binding kind.
    #[must_use]
    pub fn from_annotation(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Returns the annotation name.
    #[must_use]
    pub fn annotation_name(self) -> &'static str {
        self.into()
    }

    /// Returns the `type` written to `function.json`.
    #[must_use]
    pub const fn binding_type(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Queue => "queue",
            Self::Blob => "blob",
            Self::CosmosDb => "cosmosDB",
        }
    }

    /// Returns the binding `name` written to `function.json`.
    #[must_use]
    pub const fn parameter_name(self) -> &'static str {
        match self {
            Self::Http => RESP,
            _ => OUT_MSG,
        }
    }

    /// Fields the annotation must carry.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Http => &[],
            Self::Queue => &[QUEUE_NAME],
            Self::Blob => &[PATH],
            Self::CosmosDb => &[DATABASE_NAME, COLLECTION_NAME],
        }
    }

    /// Optional fields with the value used when the annotation omits them.
    #[must_use]
    pub const fn optional_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Http => &[],
            Self::Queue | Self::Blob => &[(CONNECTION, DEFAULT_CONNECTION)],
            Self::CosmosDb => &[(CONNECTION_STRING_SETTING, DEFAULT_COSMOS_CONNECTION)],
        }
    }
}

/// Error type names raised by the function runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
pub enum RuntimeErrorKind {
    /// The request carried no payload where one was required.
    #[strum(serialize = "PayloadNotFoundError")]
    PayloadNotFound,
    /// No function is registered under the requested name.
    #[strum(serialize = "FunctionNotFoundError")]
    FunctionNotFound,
    /// The payload could not be converted to the declared type.
    #[strum(serialize = "InvalidPayloadError")]
    InvalidPayload,
}
