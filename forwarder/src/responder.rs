use dns::{Answer, Message, OPCODE_QUERY, RCODE_NOT_IMPLEMENTED, RCODE_NO_ERROR};
use futures::future;

use crate::error::ForwardError;
use crate::upstream::Upstream;

pub const SYNTHETIC_TTL: u32 = 60;
pub const SYNTHETIC_RDATA: [u8; 4] = [8, 8, 8, 8];

/// Turns one query datagram into one response datagram.
///
/// Without an upstream every question gets a placeholder answer. With one,
/// queries are relayed: a single question as the original datagram, several
/// questions one at a time, with the answers stitched back together in
/// question order.
pub struct Responder<U> {
    upstream: Option<U>,
    parallel: bool,
}

impl<U: Upstream> Responder<U> {
    pub fn new(upstream: Option<U>) -> Self {
        Self {
            upstream,
            parallel: false,
        }
    }

    /// Relay the questions of a multi-question query concurrently.
    pub fn with_parallel_relay(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub async fn handle(&self, request: &[u8]) -> Result<Vec<u8>, ForwardError> {
        let query = dns::decode_query(request)?;
        tracing::debug!("query: {:?}", query);

        match &self.upstream {
            None => synthesize(query),
            Some(upstream) => self.relay(upstream, request, query).await,
        }
    }

    async fn relay(&self, upstream: &U, request: &[u8], query: Message) -> Result<Vec<u8>, ForwardError> {
        match query.questions.len() {
            0 => {
                tracing::debug!("no questions to relay, echoing request");
                Ok(request.to_vec())
            }
            1 => {
                tracing::debug!("relaying question: {:?}", query.questions[0]);
                upstream.exchange(request).await
            }
            _ => self.relay_each(upstream, query).await,
        }
    }

    async fn relay_each(&self, upstream: &U, query: Message) -> Result<Vec<u8>, ForwardError> {
        let Message {
            header, questions, ..
        } = query;

        let mut single_header = header;
        single_header.qdcount = 1;

        let requests = questions
            .iter()
            .map(|q| {
                Message {
                    header: single_header,
                    questions: vec![q.clone()],
                    answers: vec![],
                }
                .to_bytes()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let replies = if self.parallel {
            future::join_all(requests.iter().map(|r| relay_one(upstream, r))).await
        } else {
            let mut replies = Vec::with_capacity(requests.len());
            for r in &requests {
                replies.push(relay_one(upstream, r).await);
            }
            replies
        };

        // Whatever the upstream put after the echoed request is the answer section.
        let mut answer_bytes: Vec<u8> = vec![];
        for (request, reply) in requests.iter().zip(&replies) {
            if reply.len() > request.len() {
                answer_bytes.extend_from_slice(&reply[request.len()..]);
            }
        }

        // One answer per question is assumed, even when a relay came back empty.
        let count = questions.len() as u16;
        let mut response_header = header;
        response_header.response = true;
        response_header.qdcount = count;
        response_header.ancount = count;

        let mut response = Message {
            header: response_header,
            questions,
            answers: vec![],
        }
        .to_bytes()?;
        response.extend_from_slice(&answer_bytes);

        Ok(response)
    }
}

// A failed relay contributes no answer bytes instead of failing the response.
async fn relay_one<U: Upstream>(upstream: &U, request: &[u8]) -> Vec<u8> {
    match upstream.exchange(request).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("relay failed, question left unanswered: {}", e);
            vec![]
        }
    }
}

fn synthesize(query: Message) -> Result<Vec<u8>, ForwardError> {
    let Message {
        mut header,
        questions,
        ..
    } = query;

    let answers: Vec<Answer> = questions
        .iter()
        .map(|q| Answer {
            name: q.name.clone(),
            rtype: q.qtype,
            rclass: q.qclass,
            ttl: SYNTHETIC_TTL,
            rdata: SYNTHETIC_RDATA.to_vec(),
        })
        .collect();

    header.response = true;
    header.rcode = if header.opcode == OPCODE_QUERY {
        RCODE_NO_ERROR
    } else {
        RCODE_NOT_IMPLEMENTED
    };
    header.ancount = answers.len() as u16;

    let response = Message {
        header,
        questions,
        answers,
    };

    Ok(response.to_bytes()?)
}
