use crate::cli::commands::Command;
use crate::cli::context::{CommandContext, DetailSource};
use crate::core::api::segment;
use crate::core::error::AzaError;
use crate::core::present::{Presented, ResourceKind};

const FILE_DETAIL: DetailSource = DetailSource { prefix: "files" };

/// Map a command onto its API path and run it.
pub(crate) async fn execute(ctx: &CommandContext, command: &Command) -> Result<Presented, AzaError> {
    match command {
        Command::ListAgents => ctx.list(ResourceKind::Agent, "assistants", None).await,
        Command::ShowAgent { agent_id } => {
            let path = format!("assistants/{}", segment(agent_id));
            ctx.show(ResourceKind::Agent, &path, None).await
        }
        Command::ListThreads => ctx.list(ResourceKind::Thread, "threads", None).await,
        Command::ShowThread { thread_id } => {
            let path = format!("threads/{}", segment(thread_id));
            ctx.show(ResourceKind::Thread, &path, None).await
        }
        Command::ListRuns { thread_id } => {
            let path = format!("threads/{}/runs", segment(thread_id));
            ctx.list(ResourceKind::Run, &path, None).await
        }
        Command::ShowRun { thread_id, run_id } => {
            let path = format!("threads/{}/runs/{}", segment(thread_id), segment(run_id));
            ctx.show(ResourceKind::Run, &path, None).await
        }
        Command::ListVectorStores => {
            ctx.list(ResourceKind::VectorStore, "vector_stores", None)
                .await
        }
        Command::ShowVectorStore { vector_store_id } => {
            let path = format!("vector_stores/{}", segment(vector_store_id));
            ctx.show(ResourceKind::VectorStore, &path, None).await
        }
        Command::ListVectorStoreFiles { vector_store_id } => {
            let path = format!("vector_stores/{}/files", segment(vector_store_id));
            ctx.list(ResourceKind::VectorStoreFile, &path, Some(FILE_DETAIL))
                .await
        }
        Command::ShowVectorStoreFile {
            vector_store_id,
            file_id,
        } => {
            let path = format!(
                "vector_stores/{}/files/{}",
                segment(vector_store_id),
                segment(file_id)
            );
            ctx.show(ResourceKind::VectorStoreFile, &path, Some(FILE_DETAIL))
                .await
        }
        Command::ListFiles => ctx.list(ResourceKind::File, "files", None).await,
        Command::ShowFile { file_id } => {
            let path = format!("files/{}", segment(file_id));
            ctx.show(ResourceKind::File, &path, None).await
        }
    }
}
