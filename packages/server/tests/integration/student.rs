use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use school_server::entity::avatar;

use crate::common::{TestApp, routes};

mod student_crud {
    use super::*;

    #[tokio::test]
    async fn create_with_and_without_faculty() {
        let app = TestApp::spawn().await;
        let faculty = app.create_faculty("Gryffindor", "Red").await;

        let res = app
            .post(
                routes::STUDENT,
                &json!({ "name": "Harry", "age": 15, "faculty_id": faculty }),
            )
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["id"], 1);
        assert_eq!(res.body["name"], "Harry");
        assert_eq!(res.body["age"], 15);
        assert_eq!(res.body["faculty_id"], faculty);

        let res = app
            .post(routes::STUDENT, &json!({ "name": "Luna", "age": 14 }))
            .await;
        assert_eq!(res.status, 201);
        assert!(res.body["faculty_id"].is_null());
    }

    #[tokio::test]
    async fn create_with_unknown_faculty_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENT,
                &json!({ "name": "Harry", "age": 15, "faculty_id": 99 }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Faculty not found");
        assert_eq!(app.get(routes::STUDENT_ALL).await.body, json!([]));
    }

    #[tokio::test]
    async fn get_existing_and_missing() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Hermione", 15, None).await;

        let res = app.get(&routes::student(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Hermione");

        let res = app.get(&routes::student(999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_all_in_id_order() {
        let app = TestApp::spawn().await;
        let a = app.create_student("Harry", 15, None).await;
        let b = app.create_student("Ron", 15, None).await;
        let c = app.create_student("Hermione", 15, None).await;

        let res = app.get(routes::STUDENT_ALL).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![a, b, c]);
    }
}

mod student_update {
    use super::*;

    #[tokio::test]
    async fn overwrites_all_fields() {
        let app = TestApp::spawn().await;
        let gryffindor = app.create_faculty("Gryffindor", "Red").await;
        let slytherin = app.create_faculty("Slytherin", "Green").await;
        let id = app.create_student("Harry", 15, Some(gryffindor)).await;

        let res = app
            .put(
                routes::STUDENT,
                &json!({ "id": id, "name": "Harry", "age": 16, "faculty_id": slytherin }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["age"], 16);
        assert_eq!(res.body["faculty_id"], slytherin);
    }

    #[tokio::test]
    async fn omitted_faculty_detaches_student() {
        let app = TestApp::spawn().await;
        let faculty = app.create_faculty("Gryffindor", "Red").await;
        let id = app.create_student("Harry", 15, Some(faculty)).await;

        let res = app
            .put(routes::STUDENT, &json!({ "id": id, "name": "Harry", "age": 15 }))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["faculty_id"].is_null());
    }

    #[tokio::test]
    async fn without_id_creates_new_student() {
        let app = TestApp::spawn().await;

        let res = app
            .put(routes::STUDENT, &json!({ "name": "Neville", "age": 15 }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], 1);
        assert_eq!(app.get(&routes::student(1)).await.body["name"], "Neville");
    }

    #[tokio::test]
    async fn unknown_id_or_faculty_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Harry", 15, None).await;

        let res = app
            .put(routes::STUDENT, &json!({ "id": 77, "name": "Ghost", "age": 300 }))
            .await;
        assert_eq!(res.status, 404);

        let res = app
            .put(
                routes::STUDENT,
                &json!({ "id": id, "name": "Harry", "age": 15, "faculty_id": 5 }),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(app.get(&routes::student(id)).await.body["faculty_id"], json!(null));
    }
}

mod student_delete {
    use super::*;

    #[tokio::test]
    async fn returns_snapshot_and_removes() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Cedric", 17, None).await;

        let res = app.delete(&routes::student(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["name"], "Cedric");
        assert_eq!(app.get(&routes::student(id)).await.status, 404);
        assert_eq!(app.delete(&routes::student(id)).await.status, 404);
    }

    #[tokio::test]
    async fn removes_avatar_record_and_file() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Harry", 15, None).await;
        let res = app
            .upload_avatar(id, "me.png", b"PNG_DATA".to_vec(), Some("image/png"))
            .await;
        assert_eq!(res.status, 201, "upload failed: {}", res.text);
        assert_eq!(app.avatar_files(), vec!["1_Harry.png"]);

        let res = app.delete(&routes::student(id)).await;
        assert_eq!(res.status, 200);

        assert_eq!(avatar::Entity::find().count(&app.db).await.unwrap(), 0);
        assert!(app.avatar_files().is_empty());
        assert_eq!(app.get(&routes::avatar(id)).await.status, 404);
    }
}

mod student_lookup {
    use super::*;

    #[tokio::test]
    async fn age_range_is_inclusive() {
        let app = TestApp::spawn().await;
        app.create_student("Ginny", 11, None).await;
        let harry = app.create_student("Harry", 12, None).await;
        let fred = app.create_student("Fred", 14, None).await;
        app.create_student("Percy", 15, None).await;

        let res = app.get(&routes::students_by_age("startAge=12&endAge=14")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![harry, fred]);
    }

    #[tokio::test]
    async fn reversed_range_is_empty() {
        let app = TestApp::spawn().await;
        app.create_student("Harry", 12, None).await;

        let res = app.get(&routes::students_by_age("startAge=14&endAge=10")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn missing_or_invalid_bounds_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::students_by_age("startAge=10")).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .get(&routes::students_by_age("startAge=ten&endAge=12"))
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn faculty_of_student() {
        let app = TestApp::spawn().await;
        let faculty = app.create_faculty("Ravenclaw", "Blue").await;
        let luna = app.create_student("Luna", 14, Some(faculty)).await;
        let unsorted = app.create_student("Unsorted", 11, None).await;

        let res = app.get(&routes::student_faculty(luna)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], faculty);
        assert_eq!(res.body["name"], "Ravenclaw");

        let res = app.get(&routes::student_faculty(unsorted)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.text, "null");

        let res = app.get(&routes::student_faculty(500)).await;
        assert_eq!(res.status, 404);
    }
}

#[tokio::test]
async fn school_scenario() {
    let app = TestApp::spawn().await;

    let gryffindor = app.create_faculty("Gryffindor", "Red").await;
    assert_eq!(gryffindor, 1);

    let harry = app.create_student("Harry", 15, Some(gryffindor)).await;
    assert_eq!(harry, 1);

    let res = app.get(&routes::student_faculty(harry)).await;
    assert_eq!(res.body["id"], gryffindor);

    let res = app
        .get(&routes::faculty_by_color("name=Gryffindor&color=Blue"))
        .await;
    assert_eq!(res.ids(), vec![gryffindor]);

    let res = app.get(&routes::faculty_by_color("name=x&color=y")).await;
    assert_eq!(res.body, json!([]));

    let res = app.get(&routes::faculty_students(gryffindor)).await;
    assert_eq!(res.ids(), vec![harry]);
}
