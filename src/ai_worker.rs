use crate::ai::ContentClient;
use crate::logger;
use crate::models::{AiRequest, AiResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;

/// Run provider calls off the UI thread. Every request becomes its own task,
/// so a slow call never holds back a newer one; responses come back tagged
/// with the request's ticket and the owner decides whether they are stale.
/// The worker exits once every request sender is dropped.
pub fn spawn_ai_worker(
    client: Arc<ContentClient>,
    ai_rx: Receiver<AiRequest>,
    ai_tx: Sender<AiResponse>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("toefl-itp-trainer::ai_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::error(&format!("Failed to start AI runtime: {}", e));
                    return;
                }
            };

            while let Ok(request) = ai_rx.recv() {
                logger::log(&format!(
                    "Worker received request (generation {})",
                    request.ticket().generation
                ));
                rt.spawn(handle_request(client.clone(), request, ai_tx.clone()));
            }

            logger::log("Worker channel disconnected, exiting");
        })
}

async fn handle_request(client: Arc<ContentClient>, request: AiRequest, ai_tx: Sender<AiResponse>) {
    let response = match request {
        AiRequest::GenerateQuestion { ticket, prompt } => AiResponse::Question {
            ticket,
            result: client.generate_structured(&prompt).await,
        },
        AiRequest::GenerateText { ticket, prompt } => AiResponse::Text {
            ticket,
            text: client.generate_text(&prompt).await,
        },
    };

    if ai_tx.send(response).is_err() {
        logger::log("UI dropped before response arrived");
    }
}
