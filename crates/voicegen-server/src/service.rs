use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::dispatcher::{Dispatcher, GenerateVoiceParams};

const INSTRUCTIONS: &str = "Voice generation server. The generate_voice tool turns text into \
speech audio via the Minimax API, stores the result in object storage, and returns a public \
URL valid for 30 days.";

/// MCP service exposing the voice generation tool
#[derive(Clone)]
pub struct VoiceGenService {
    dispatcher: Arc<Dispatcher>,
    tool_router: ToolRouter<Self>,
}

impl VoiceGenService {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl VoiceGenService {
    #[tool(
        description = "Generate speech audio from text using the Minimax speech API, upload it to object storage, and return the public URL."
    )]
    async fn generate_voice(
        &self,
        Parameters(params): Parameters<GenerateVoiceParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        // HTTP transports attach the request parts; the stdio pipe has none
        let headers = context
            .extensions
            .get::<http::request::Parts>()
            .map(|parts| &parts.headers);

        match self.dispatcher.dispatch(params, headers).await {
            Ok(stored) => {
                let payload = serde_json::json!({
                    "url": stored.url,
                    "key": stored.key,
                    "size": stored.size,
                });
                Ok(CallToolResult::success(vec![Content::text(payload.to_string())]))
            }
            Err(err) => {
                tracing::error!("generate_voice failed: {err}");
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for VoiceGenService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
