use crate::core::error::AzaError;

const AGENTS_USAGE: &str = "Usage: aza agents (list|show <agentId>)";
const THREADS_USAGE: &str =
    "Usage: aza threads (list|show <threadId>|runs list <threadId>|runs show <threadId> <runId>)";
const RUNS_USAGE: &str = "Usage: aza runs (list <threadId>|show <threadId> <runId>)";
const VS_USAGE: &str = "Usage: aza vs (list|show <vectorStoreId>|files list <vectorStoreId>|files show <vectorStoreId> <fileId>)";
const VS_FILES_USAGE: &str =
    "Usage: aza vs files (list <vectorStoreId>|show <vectorStoreId> <fileId>)";
const FILES_USAGE: &str = "Usage: aza files (list|show <fileId>)";

/// A fully resolved invocation. Every required id is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    ListAgents,
    ShowAgent {
        agent_id: String,
    },
    ListThreads,
    ShowThread {
        thread_id: String,
    },
    ListRuns {
        thread_id: String,
    },
    ShowRun {
        thread_id: String,
        run_id: String,
    },
    ListVectorStores,
    ShowVectorStore {
        vector_store_id: String,
    },
    ListVectorStoreFiles {
        vector_store_id: String,
    },
    ShowVectorStoreFile {
        vector_store_id: String,
        file_id: String,
    },
    ListFiles,
    ShowFile {
        file_id: String,
    },
}

fn required(value: Option<&String>, name: &str) -> Result<String, AzaError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| AzaError::usage(format!("Missing {}", name)))
}

fn required_pair(
    first: Option<&String>,
    second: Option<&String>,
    message: &str,
) -> Result<(String, String), AzaError> {
    match (
        first.filter(|v| !v.is_empty()),
        second.filter(|v| !v.is_empty()),
    ) {
        (Some(a), Some(b)) => Ok((a.clone(), b.clone())),
        _ => Err(AzaError::usage(message)),
    }
}

fn runs_command(action: Option<&str>, rest: &[String]) -> Option<Result<Command, AzaError>> {
    match action {
        Some("list") => Some(
            required(rest.first(), "threadId").map(|thread_id| Command::ListRuns { thread_id }),
        ),
        Some("show") => Some(
            required_pair(rest.first(), rest.get(1), "Need threadId and runId")
                .map(|(thread_id, run_id)| Command::ShowRun { thread_id, run_id }),
        ),
        _ => None,
    }
}

impl Command {
    /// Resolve positionals into a command. Fails with a usage error before
    /// anything touches the network.
    pub(crate) fn parse(positional: &[String]) -> Result<Self, AzaError> {
        let word = |i: usize| positional.get(i).map(String::as_str);
        let rest = |i: usize| positional.get(i..).unwrap_or(&[]);

        let Some(main) = word(0) else {
            return Err(AzaError::usage("No command provided"));
        };

        match main {
            "agents" | "agent" => match word(1) {
                Some("list") => Ok(Command::ListAgents),
                Some("show") => {
                    required(positional.get(2), "agentId").map(|agent_id| Command::ShowAgent {
                        agent_id,
                    })
                }
                _ => Err(AzaError::usage(AGENTS_USAGE)),
            },
            "threads" | "thread" => match word(1) {
                Some("list") => Ok(Command::ListThreads),
                Some("show") => required(positional.get(2), "threadId")
                    .map(|thread_id| Command::ShowThread { thread_id }),
                Some("runs") => runs_command(word(2), rest(3))
                    .unwrap_or_else(|| Err(AzaError::usage(THREADS_USAGE))),
                _ => Err(AzaError::usage(THREADS_USAGE)),
            },
            "runs" | "run" => {
                runs_command(word(1), rest(2)).unwrap_or_else(|| Err(AzaError::usage(RUNS_USAGE)))
            }
            "vs" | "vector-stores" | "vectorstores" => match word(1) {
                Some("list") => Ok(Command::ListVectorStores),
                Some("show") => required(positional.get(2), "vectorStoreId")
                    .map(|vector_store_id| Command::ShowVectorStore { vector_store_id }),
                Some("files") => match word(2) {
                    Some("list") => required(positional.get(3), "vectorStoreId")
                        .map(|vector_store_id| Command::ListVectorStoreFiles { vector_store_id }),
                    Some("show") => required_pair(
                        positional.get(3),
                        positional.get(4),
                        "Need vectorStoreId and fileId",
                    )
                    .map(|(vector_store_id, file_id)| Command::ShowVectorStoreFile {
                        vector_store_id,
                        file_id,
                    }),
                    _ => Err(AzaError::usage(VS_FILES_USAGE)),
                },
                _ => Err(AzaError::usage(VS_USAGE)),
            },
            "files" | "file" => match word(1) {
                Some("list") => Ok(Command::ListFiles),
                Some("show") => required(positional.get(2), "fileId")
                    .map(|file_id| Command::ShowFile { file_id }),
                _ => Err(AzaError::usage(FILES_USAGE)),
            },
            other => Err(AzaError::usage(format!("Unknown command {}", other))),
        }
    }

    pub(crate) fn is_list(&self) -> bool {
        matches!(
            self,
            Command::ListAgents
                | Command::ListThreads
                | Command::ListRuns { .. }
                | Command::ListVectorStores
                | Command::ListVectorStoreFiles { .. }
                | Command::ListFiles
        )
    }
}
