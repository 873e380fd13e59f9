//! Long-running operation endpoints

use crate::DialogflowClient;
use crate::error::{ClientError, Result};
use dfcx_core::domain::operation::{NOT_FOUND_CODE, Operation, OperationPoll};

impl DialogflowClient {
    /// Fetch the current state of an operation
    pub async fn get_operation(&self, name: &str) -> Result<Operation> {
        let url = self.resource_url(name);
        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Poll an operation once and interpret what it reports
    ///
    /// A finished operation carrying a NOT_FOUND status surfaces as
    /// [`ClientError::NotFound`] with the service's message untouched, so callers
    /// can tell transient "not ready" conditions apart by message.
    pub async fn poll_operation(&self, operation: &Operation) -> Result<OperationPoll> {
        let current = self.get_operation(&operation.name).await?;
        resolve_operation(current)
    }
}

/// Interpret an operation snapshot
pub fn resolve_operation(operation: Operation) -> Result<OperationPoll> {
    if operation.is_running() {
        return Ok(OperationPoll::Running);
    }

    if let Some(status) = operation.error {
        return Err(match status.code {
            NOT_FOUND_CODE => ClientError::NotFound(status.message),
            code => ClientError::OperationFailed {
                code,
                message: status.message,
            },
        });
    }

    operation
        .response
        .and_then(|response| response.result)
        .map(OperationPoll::Completed)
        .ok_or_else(|| {
            ClientError::ParseError(format!(
                "Operation {} finished without a result",
                operation.name
            ))
        })
}
