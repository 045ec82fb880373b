// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the signed HTTP transport using wiremock.

use serde_json::json;
use switchbot_lib::command::{CurtainCommand, KeyType};
use switchbot_lib::device::Device;
use switchbot_lib::protocol::sign;
use switchbot_lib::response::DeviceStatus;
use switchbot_lib::types::CurtainMode;
use switchbot_lib::{Client, Error, HttpClient, HttpConfig, ProtocolError};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";
const SECRET: &str = "test-secret";

fn client_for(server: &MockServer) -> Client<HttpClient> {
    let config = HttpConfig::new(TOKEN, SECRET).with_base_url(server.uri());
    Client::from_config(config).unwrap()
}

fn success(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "statusCode": 100,
        "message": "success",
        "body": body
    }))
}

// ============================================================================
// Signing
// ============================================================================

mod signing {
    use super::*;

    #[tokio::test]
    async fn every_request_carries_auth_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/scenes"))
            .and(header("Authorization", TOKEN))
            .and(header_exists("t"))
            .and(header_exists("nonce"))
            .and(header_exists("sign"))
            .respond_with(success(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let scenes = client_for(&server).scenes().await.unwrap().into_body();
        assert!(scenes.is_empty());
    }

    #[tokio::test]
    async fn signature_matches_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/scenes"))
            .respond_with(success(json!([])))
            .mount(&server)
            .await;

        client_for(&server).scenes().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let headers = &requests[0].headers;
        let text = |name: &str| headers.get(name).unwrap().to_str().unwrap().to_string();

        let timestamp: i64 = text("t").parse().unwrap();
        let expected = sign(TOKEN, SECRET, timestamp, &text("nonce")).unwrap();
        assert_eq!(text("sign"), expected);
        assert_eq!(expected, expected.to_uppercase());
    }

    #[tokio::test]
    async fn unauthorized_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).devices().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn http_error_keeps_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/devices/C1/commands"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "statusCode": 190,
                "message": "Device internal error due to device states not synchronized with server"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).bot("C1").press().await.unwrap_err();
        let Error::Protocol(ProtocolError::Status { status, reason }) = err else {
            panic!("expected HTTP status error");
        };
        assert_eq!(status, 500);
        assert_eq!(
            reason,
            "Device internal error due to device states not synchronized with server"
        );
    }

    #[tokio::test]
    async fn http_error_without_envelope_uses_reason_phrase() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server).devices().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "protocol error: HTTP 503 - Service Unavailable"
        );
    }
}

// ============================================================================
// Device list and status
// ============================================================================

mod devices {
    use super::*;

    #[tokio::test]
    async fn decodes_mixed_device_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices"))
            .respond_with(success(json!({
                "deviceList": [
                    {"deviceId": "H1", "deviceName": "Hub", "deviceType": "Hub 2",
                     "enableCloudService": false, "hubDeviceId": "000000000000"},
                    {"deviceId": "C1", "deviceName": "Living room", "deviceType": "Curtain3",
                     "enableCloudService": true, "hubDeviceId": "H1",
                     "curtainDevicesIds": ["C1", "C2"], "calibrate": true,
                     "group": true, "master": true, "openDirection": "left"},
                    {"deviceId": "X1", "deviceName": "Prototype", "deviceType": "Robot Arm",
                     "enableCloudService": true, "firmware": "0.1"}
                ],
                "infraredRemoteList": [
                    {"deviceId": "R1", "deviceName": "TV", "remoteType": "TV", "hubDeviceId": "H1"}
                ]
            })))
            .mount(&server)
            .await;

        let list = client_for(&server).devices().await.unwrap().into_body();

        assert_eq!(list.device_list.len(), 3);
        assert!(matches!(list.device_list[0], Device::Hub(_)));
        assert_eq!(list.device_list[0].info().hub_device_id.as_deref(), Some("000000000000"));

        let Device::Curtain(curtain) = &list.device_list[1] else {
            panic!("expected curtain");
        };
        assert_eq!(curtain.curtain_device_ids, ["C1", "C2"]);

        let Device::Other(other) = &list.device_list[2] else {
            panic!("expected fallback variant");
        };
        assert_eq!(other.extra["firmware"], "0.1");

        assert_eq!(list.infrared_remote_list.len(), 1);
        assert_eq!(list.remote("R1").unwrap().remote_type(), "TV");
    }

    #[tokio::test]
    async fn bad_entry_aborts_the_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices"))
            .respond_with(success(json!({
                "deviceList": [
                    {"deviceId": "B1", "deviceType": "Bot"},
                    {"deviceId": "B2"}
                ],
                "infraredRemoteList": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).devices().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(switchbot_lib::DecodeError::MissingDiscriminator { index: 1, .. })
        ));
    }

    #[tokio::test]
    async fn api_status_code_is_not_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/NOPE/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 152,
                "message": "error:device not found",
                "body": {}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).device_status("NOPE").await.unwrap_err();
        let Error::Api {
            status_code,
            message,
        } = err
        else {
            panic!("expected API error");
        };
        assert_eq!(status_code, 152);
        assert_eq!(message, "error:device not found");
    }

    #[tokio::test]
    async fn lock_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/L1/status"))
            .respond_with(success(json!({
                "deviceId": "L1",
                "deviceType": "Smart Lock",
                "hubDeviceId": "H1",
                "lockState": "locked",
                "doorState": "closed",
                "calibrate": true
            })))
            .mount(&server)
            .await;

        let status = client_for(&server)
            .device_status("L1")
            .await
            .unwrap()
            .into_body();
        assert!(matches!(status, DeviceStatus::Lock(_)));
        assert_eq!(status.info().device_id, "L1");
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn curtain_set_position_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/devices/C1/commands"))
            .and(body_json(json!({
                "commandType": "command",
                "command": "setPosition",
                "parameter": "0,ff,75"
            })))
            .respond_with(success(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let curtain = client.curtain("C1");

        curtain.set_position(75, CurtainMode::Default).await.unwrap();
        curtain
            .dispatch(&json!({"command": "SetPosition", "mode": "ff", "position": 75}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[tokio::test]
    async fn invalid_mode_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(success(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .curtain("C1")
            .dispatch(&json!({"command": "SetPosition", "mode": "00", "position": 75}))
            .await
            .unwrap_err();

        let Error::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert!(violations.mentions("/mode"));
        assert!(violations.to_string().contains("0, 1, ff"));
    }

    #[tokio::test]
    async fn unknown_command_lists_valid_names() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client
            .curtain("C1")
            .dispatch(&json!({"command": "Explode"}))
            .await
            .unwrap_err();

        let Error::UnknownCommand { command, valid } = err else {
            panic!("expected unknown command");
        };
        assert_eq!(command, "Explode");
        assert!(valid.contains(&"SetPosition"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keypad_create_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/devices/K1/commands"))
            .and(body_json(json!({
                "commandType": "command",
                "command": "createKey",
                "parameter": {
                    "name": "Guest",
                    "type": "permanent",
                    "password": "12345678"
                }
            })))
            .respond_with(success(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .keypad("K1")
            .create_key("Guest", KeyType::Permanent, "12345678", None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ids_are_percent_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/devices/A%20B/commands"))
            .respond_with(success(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).bot("A B").press().await.unwrap();
    }

    #[test]
    fn typed_commands_are_comparable() {
        let a = CurtainCommand::set_position(10, CurtainMode::Silent).unwrap();
        let b = CurtainCommand::set_position(10, CurtainMode::Silent).unwrap();
        assert_eq!(a, b);
    }
}

// ============================================================================
// Scenes and webhooks
// ============================================================================

mod scenes_and_webhooks {
    use super::*;

    #[tokio::test]
    async fn list_and_execute_scene() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/scenes"))
            .respond_with(success(json!([
                {"sceneId": "T01-1", "sceneName": "Good night"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1.1/scenes/T01-1/execute"))
            .respond_with(success(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let scenes = client.scenes().await.unwrap().into_body();
        assert_eq!(scenes[0].scene_name, "Good night");
        client.execute_scene(&scenes[0].scene_id).await.unwrap();
    }

    #[tokio::test]
    async fn query_webhook_details() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/webhook/queryWebhook"))
            .and(body_json(json!({
                "action": "queryDetails",
                "urls": ["https://example.com/hook"]
            })))
            .respond_with(success(json!([{
                "url": "https://example.com/hook",
                "createTime": 123,
                "lastUpdateTime": 456,
                "deviceList": "ALL",
                "enable": true
            }])))
            .mount(&server)
            .await;

        let details = client_for(&server)
            .query_webhook_details(&["https://example.com/hook"])
            .await
            .unwrap()
            .into_body();
        assert_eq!(details.len(), 1);
        assert!(details[0].enable);
    }

    #[tokio::test]
    async fn delete_webhook() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/webhook/deleteWebhook"))
            .and(body_json(json!({
                "action": "deleteWebhook",
                "url": "https://example.com/hook"
            })))
            .respond_with(success(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_webhook("https://example.com/hook")
            .await
            .unwrap();
    }
}
