use std::collections::HashMap;
use std::time::{Duration, Instant};

use actix::prelude::{Actor, Context, Handler, Message as ActixMessage, Recipient};
use actix::{
    fut,
    prelude::{Addr, StreamHandler},
    ActorContext, ActorFutureExt, AsyncContext, ContextFutureSpawner, WrapFuture,
};
use actix_web_actors::ws;
use serde::Serialize;
use serde_json::{error::Result as SerdeResult, to_string, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// `DonationReceived` is reserved for settled payments that landed a feed
/// row; pledges that have not settled announce as `PledgeReceived` so feed
/// clients do not refresh for rows that are not there yet.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WebSocketActionType {
    DonationReceived,
    PledgeReceived,
    DonationStatusUpdate,
}

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Message(pub String);

/// Change notification pushed to every session subscribed to the campaign.
/// Clients treat it as a hint and re-query the full donation list.
#[derive(ActixMessage, Serialize)]
#[rtype(result = "()")]
pub struct MessageToClient {
    #[serde(skip_serializing)]
    pub campaign_id: Uuid,
    pub action_type: WebSocketActionType,
    pub data: Value,
}

impl MessageToClient {
    pub fn new(campaign_id: Uuid, action_type: WebSocketActionType, data: Value) -> Self {
        Self {
            campaign_id,
            action_type,
            data,
        }
    }
}

struct CampaignSession {
    addr: Recipient<Message>,
    campaign_id: Uuid,
}

pub struct Server {
    sessions: HashMap<String, CampaignSession>,
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

impl Server {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    fn send_message_to_campaign(&self, campaign_id: Uuid, data: SerdeResult<String>) {
        match data {
            Ok(data) => {
                for session in self
                    .sessions
                    .values()
                    .filter(|s| s.campaign_id == campaign_id)
                {
                    if let Err(err) = session.addr.try_send(Message(data.clone())) {
                        error!("Error sending client message: {:?}", err);
                    }
                }
            }
            Err(err) => {
                error!("Data did not convert to string {:?}", err);
            }
        }
    }
}

impl Actor for Server {
    type Context = Context<Self>;
}

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Connect {
    pub addr: Recipient<Message>,
    pub id: String,
    pub campaign_id: Uuid,
}

impl Handler<Connect> for Server {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        self.sessions.insert(
            msg.id,
            CampaignSession {
                addr: msg.addr,
                campaign_id: msg.campaign_id,
            },
        );
    }
}

#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: String,
}

impl Handler<Disconnect> for Server {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        self.sessions.remove(&msg.id);
    }
}

impl Handler<MessageToClient> for Server {
    type Result = ();

    fn handle(&mut self, msg: MessageToClient, _: &mut Context<Self>) -> Self::Result {
        let message_str = to_string(&msg);
        self.send_message_to_campaign(msg.campaign_id, message_str);
    }
}

pub struct WebSocketSession {
    id: String,
    campaign_id: Uuid,
    hb: Instant,
    server_addr: Addr<Server>,
}

impl WebSocketSession {
    pub fn new(campaign_id: Uuid, server_addr: Addr<Server>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            campaign_id,
            hb: Instant::now(),
            server_addr,
        }
    }

    fn send_heartbeat(&self, ctx: &mut <Self as Actor>::Context) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                info!("Websocket client heartbeat failed, disconnecting!");
                act.server_addr.do_send(Disconnect { id: act.id.clone() });
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for WebSocketSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.send_heartbeat(ctx);

        let session_addr = ctx.address();
        self.server_addr
            .send(Connect {
                addr: session_addr.recipient(),
                id: self.id.clone(),
                campaign_id: self.campaign_id,
            })
            .into_actor(self)
            .then(|res, _act, ctx| {
                match res {
                    Ok(_res) => {}
                    _ => ctx.stop(),
                }
                fut::ready(())
            })
            .wait(ctx);
    }
}

impl Handler<Message> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: Message, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WebSocketSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                info!("closed ws session");
                self.server_addr.do_send(Disconnect {
                    id: self.id.clone(),
                });
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Text(text)) => {
                // The feed is server-push only; clients refresh over HTTP.
                info!("Ignoring inbound text frame: {}", text);
            }
            Ok(_) => {}
            Err(err) => {
                warn!("Error handling msg: {:?}", err);
                ctx.stop()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Collector {
        received: Arc<Mutex<Vec<String>>>,
    }

    impl Actor for Collector {
        type Context = Context<Self>;
    }

    impl Handler<Message> for Collector {
        type Result = ();

        fn handle(&mut self, msg: Message, _: &mut Context<Self>) {
            self.received.lock().unwrap().push(msg.0);
        }
    }

    #[actix_web::test]
    async fn notification_only_reaches_sessions_of_the_same_campaign() {
        let server = Server::new().start();
        let campaign_a = Uuid::new_v4();
        let campaign_b = Uuid::new_v4();

        let received_a = Arc::new(Mutex::new(Vec::new()));
        let received_b = Arc::new(Mutex::new(Vec::new()));
        let collector_a = Collector {
            received: received_a.clone(),
        }
        .start();
        let collector_b = Collector {
            received: received_b.clone(),
        }
        .start();

        server.do_send(Connect {
            addr: collector_a.recipient(),
            id: "session-a".to_string(),
            campaign_id: campaign_a,
        });
        server.do_send(Connect {
            addr: collector_b.recipient(),
            id: "session-b".to_string(),
            campaign_id: campaign_b,
        });

        server.do_send(MessageToClient::new(
            campaign_a,
            WebSocketActionType::DonationReceived,
            serde_json::json!({"campaignId": campaign_a}),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(received_a.lock().unwrap().len(), 1);
        assert!(received_b.lock().unwrap().is_empty());
        let payload = received_a.lock().unwrap()[0].clone();
        assert!(payload.contains("donation_received"));
    }

    #[test]
    fn pledge_frames_are_distinguishable_from_settled_donations() {
        // Feed clients refresh on "donation_received"; an unsettled pledge
        // must never carry that tag.
        assert_eq!(
            to_string(&WebSocketActionType::PledgeReceived).unwrap(),
            r#""pledge_received""#
        );
        assert_eq!(
            to_string(&WebSocketActionType::DonationReceived).unwrap(),
            r#""donation_received""#
        );
        assert_ne!(
            WebSocketActionType::PledgeReceived,
            WebSocketActionType::DonationReceived
        );
    }

    #[actix_web::test]
    async fn disconnected_session_no_longer_receives() {
        let server = Server::new().start();
        let campaign = Uuid::new_v4();
        let received = Arc::new(Mutex::new(Vec::new()));
        let collector = Collector {
            received: received.clone(),
        }
        .start();

        server.do_send(Connect {
            addr: collector.recipient(),
            id: "session".to_string(),
            campaign_id: campaign,
        });
        server.do_send(Disconnect {
            id: "session".to_string(),
        });
        server.do_send(MessageToClient::new(
            campaign,
            WebSocketActionType::DonationReceived,
            serde_json::json!({}),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(received.lock().unwrap().is_empty());
    }
}
