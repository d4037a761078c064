//! The ways sample code can invoke a method.

use crate::context::MethodContext;
use apigen_config::GrpcStreamingType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingForm {
    /// Plain request object, single response.
    Request,
    /// Paged call iterated page by page.
    RequestPaged,
    /// Paged call iterated over every resource.
    RequestPagedAll,
    RequestStreamingServer,
    RequestStreamingClient,
    RequestStreamingBidi,
    /// Long-running call awaited asynchronously.
    LongRunningRequestAsync,
}

impl CallingForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallingForm::Request => "request",
            CallingForm::RequestPaged => "request_paged",
            CallingForm::RequestPagedAll => "request_paged_all",
            CallingForm::RequestStreamingServer => "request_streaming_server",
            CallingForm::RequestStreamingClient => "request_streaming_client",
            CallingForm::RequestStreamingBidi => "request_streaming_bidi",
            CallingForm::LongRunningRequestAsync => "long_running_request_async",
        }
    }
}

/// Calling forms that apply to a method, preferred form first.
pub fn calling_forms(context: &MethodContext<'_>) -> Vec<CallingForm> {
    let method_config = context.method_config();
    if context.is_long_running() {
        return vec![CallingForm::LongRunningRequestAsync];
    }
    if context.is_page_streaming() {
        return vec![CallingForm::RequestPagedAll, CallingForm::RequestPaged];
    }
    match method_config.grpc_streaming_type() {
        Some(GrpcStreamingType::ServerStreaming) => vec![CallingForm::RequestStreamingServer],
        Some(GrpcStreamingType::ClientStreaming) => vec![CallingForm::RequestStreamingClient],
        Some(GrpcStreamingType::BidiStreaming) => vec![CallingForm::RequestStreamingBidi],
        None => vec![CallingForm::Request],
    }
}

pub fn default_calling_form(context: &MethodContext<'_>) -> CallingForm {
    calling_forms(context)
        .first()
        .copied()
        .unwrap_or(CallingForm::Request)
}
