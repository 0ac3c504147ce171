use serde_json::json;

use crate::common::{TestApp, routes};

mod faculty_crud {
    use super::*;

    #[tokio::test]
    async fn create_returns_assigned_id() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FACULTY, &json!({ "name": "Gryffindor", "color": "Red" }))
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["id"], 1);
        assert_eq!(res.body["name"], "Gryffindor");
        assert_eq!(res.body["color"], "Red");
    }

    #[tokio::test]
    async fn id_in_create_body_is_ignored() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "Red").await;

        let res = app
            .post(
                routes::FACULTY,
                &json!({ "id": 1, "name": "Slytherin", "color": "Green" }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["id"], 2);
        assert_eq!(app.get(&routes::faculty(1)).await.body["name"], "Gryffindor");
    }

    #[tokio::test]
    async fn get_existing_and_missing() {
        let app = TestApp::spawn().await;
        let id = app.create_faculty("Ravenclaw", "Blue").await;

        let res = app.get(&routes::faculty(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Ravenclaw");

        let res = app.get(&routes::faculty(999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_body_is_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::FACULTY, &json!({ "name": "No color" })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn list_all_in_id_order() {
        let app = TestApp::spawn().await;
        let a = app.create_faculty("Gryffindor", "Red").await;
        let b = app.create_faculty("Hufflepuff", "Yellow").await;

        let res = app.get(routes::FACULTY_ALL).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![a, b]);
    }

    #[tokio::test]
    async fn list_all_when_empty() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::FACULTY_ALL).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}

mod faculty_update {
    use super::*;

    #[tokio::test]
    async fn overwrites_all_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_faculty("Gryffindor", "Red").await;

        let res = app
            .put(
                routes::FACULTY,
                &json!({ "id": id, "name": "Gryffindor", "color": "Scarlet" }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["color"], "Scarlet");
        assert_eq!(app.get(&routes::faculty(id)).await.body["color"], "Scarlet");
    }

    #[tokio::test]
    async fn without_id_creates_new_faculty() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "Red").await;

        let res = app
            .put(routes::FACULTY, &json!({ "name": "Slytherin", "color": "Green" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], 2);
        assert_eq!(app.get(routes::FACULTY_ALL).await.ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                routes::FACULTY,
                &json!({ "id": 42, "name": "Nowhere", "color": "Grey" }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(app.get(routes::FACULTY_ALL).await.body, json!([]));
    }
}

mod faculty_delete {
    use super::*;

    #[tokio::test]
    async fn returns_snapshot_and_removes() {
        let app = TestApp::spawn().await;
        let id = app.create_faculty("Hufflepuff", "Yellow").await;

        let res = app.delete(&routes::faculty(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["name"], "Hufflepuff");
        assert_eq!(app.get(&routes::faculty(id)).await.status, 404);
    }

    #[tokio::test]
    async fn missing_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::faculty(7)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn detaches_students() {
        let app = TestApp::spawn().await;
        let faculty = app.create_faculty("Gryffindor", "Red").await;
        let harry = app.create_student("Harry", 15, Some(faculty)).await;

        let res = app.delete(&routes::faculty(faculty)).await;
        assert_eq!(res.status, 200);

        let student = app.get(&routes::student(harry)).await;
        assert_eq!(student.status, 200);
        assert!(student.body["faculty_id"].is_null());

        let res = app.get(&routes::student_faculty(harry)).await;
        assert_eq!(res.status, 200);
        assert!(res.body.is_null());
    }
}

mod faculty_lookup {
    use super::*;

    #[tokio::test]
    async fn matches_name_or_color_ignoring_case() {
        let app = TestApp::spawn().await;
        let gryffindor = app.create_faculty("Gryffindor", "Red").await;
        let ravenclaw = app.create_faculty("Ravenclaw", "Blue").await;
        app.create_faculty("Hufflepuff", "Yellow").await;

        let res = app
            .get(&routes::faculty_by_color("name=gryffindor&color=BLUE"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![gryffindor, ravenclaw]);
    }

    #[tokio::test]
    async fn faculty_matching_both_is_returned_once() {
        let app = TestApp::spawn().await;
        let id = app.create_faculty("Gryffindor", "Red").await;

        let res = app
            .get(&routes::faculty_by_color("name=Gryffindor&color=red"))
            .await;

        assert_eq!(res.ids(), vec![id]);
    }

    #[tokio::test]
    async fn single_parameter() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "Red").await;
        let slytherin = app.create_faculty("Slytherin", "Green").await;

        let res = app.get(&routes::faculty_by_color("color=green")).await;
        assert_eq!(res.ids(), vec![slytherin]);

        let res = app.get(&routes::faculty_by_color("name=SLYTHERIN")).await;
        assert_eq!(res.ids(), vec![slytherin]);
    }

    #[tokio::test]
    async fn non_ascii_names_match_ignoring_case() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "Red").await;
        let slytherin = app.create_faculty("Слизерин", "Зелёный").await;

        let res = app.get(&routes::faculty_by_color("name=Слизерин")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![slytherin]);

        let res = app.get(&routes::faculty_by_color("name=СЛИЗЕРИН")).await;
        assert_eq!(res.ids(), vec![slytherin]);

        let res = app.get(&routes::faculty_by_color("color=зелёный")).await;
        assert_eq!(res.ids(), vec![slytherin]);
    }

    #[tokio::test]
    async fn no_match_or_no_parameters_is_empty() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "Red").await;

        let res = app.get(&routes::faculty_by_color("name=x&color=y")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));

        let res = app.get("/faculty/by-color").await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn students_of_faculty() {
        let app = TestApp::spawn().await;
        let gryffindor = app.create_faculty("Gryffindor", "Red").await;
        let slytherin = app.create_faculty("Slytherin", "Green").await;
        let harry = app.create_student("Harry", 15, Some(gryffindor)).await;
        let ron = app.create_student("Ron", 15, Some(gryffindor)).await;
        app.create_student("Draco", 15, Some(slytherin)).await;
        app.create_student("Luna", 14, None).await;

        let res = app.get(&routes::faculty_students(gryffindor)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![harry, ron]);
    }

    #[tokio::test]
    async fn students_of_empty_and_missing_faculty() {
        let app = TestApp::spawn().await;
        let empty = app.create_faculty("Hufflepuff", "Yellow").await;

        let res = app.get(&routes::faculty_students(empty)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));

        let res = app.get(&routes::faculty_students(404)).await;
        assert_eq!(res.status, 404);
    }
}
