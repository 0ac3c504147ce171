use sea_orm::*;
use tracing::info;

use super::faculty::find_faculty;
use crate::entity::{avatar, faculty, student};
use crate::error::AppError;
use crate::models::student::{CreateStudentRequest, UpdateStudentRequest};

/// A deleted student together with the avatar file it left behind, if any.
#[derive(Debug)]
pub struct RemovedStudent {
    pub student: student::Model,
    pub avatar_file_path: Option<String>,
}

pub struct StudentService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StudentService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn add(&self, req: CreateStudentRequest) -> Result<student::Model, AppError> {
        self.check_faculty(req.faculty_id).await?;

        let model = student::ActiveModel {
            name: Set(req.name),
            age: Set(req.age),
            faculty_id: Set(req.faculty_id),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(student_id = model.id, "Student created");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<student::Model, AppError> {
        find_student(self.conn, id).await
    }

    /// Overwrite every field of an existing student. A request without an id
    /// creates a new student instead.
    pub async fn update(&self, req: UpdateStudentRequest) -> Result<student::Model, AppError> {
        let Some(id) = req.id else {
            return self
                .add(CreateStudentRequest {
                    name: req.name,
                    age: req.age,
                    faculty_id: req.faculty_id,
                })
                .await;
        };

        let existing = find_student(self.conn, id).await?;
        self.check_faculty(req.faculty_id).await?;

        let mut active: student::ActiveModel = existing.into();
        active.name = Set(req.name);
        active.age = Set(req.age);
        active.faculty_id = Set(req.faculty_id);
        let model = active.update(self.conn).await?;

        info!(student_id = id, "Student updated");
        Ok(model)
    }

    pub async fn get_all(&self) -> Result<Vec<student::Model>, AppError> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// Students aged within `[start_age, end_age]`, bounds included.
    pub async fn get_by_age(
        &self,
        start_age: i32,
        end_age: i32,
    ) -> Result<Vec<student::Model>, AppError> {
        Ok(student::Entity::find()
            .filter(student::Column::Age.between(start_age, end_age))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// `None` when the student is not assigned to a faculty.
    pub async fn get_faculty_of_student(
        &self,
        student_id: i32,
    ) -> Result<Option<faculty::Model>, AppError> {
        let student = find_student(self.conn, student_id).await?;
        match student.faculty_id {
            Some(faculty_id) => Ok(faculty::Entity::find_by_id(faculty_id)
                .one(self.conn)
                .await?),
            None => Ok(None),
        }
    }

    async fn check_faculty(&self, faculty_id: Option<i32>) -> Result<(), AppError> {
        if let Some(faculty_id) = faculty_id {
            find_faculty(self.conn, faculty_id).await?;
        }
        Ok(())
    }
}

impl<C: ConnectionTrait + TransactionTrait> StudentService<'_, C> {
    /// Delete a student and its avatar record. The avatar file itself is left
    /// for the caller to discard once the transaction has committed.
    pub async fn remove(&self, id: i32) -> Result<RemovedStudent, AppError> {
        let txn = self.conn.begin().await?;

        let student = find_student(&txn, id).await?;
        let avatar = avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(id))
            .one(&txn)
            .await?;

        if let Some(ref avatar) = avatar {
            avatar::Entity::delete_by_id(avatar.id).exec(&txn).await?;
        }
        student::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(student_id = id, had_avatar = avatar.is_some(), "Student deleted");
        Ok(RemovedStudent {
            student,
            avatar_file_path: avatar.map(|a| a.file_path),
        })
    }
}

pub fn student_service(db: &DatabaseConnection) -> StudentService<'_, DatabaseConnection> {
    StudentService::new(db)
}

pub async fn find_student<C: ConnectionTrait>(db: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))
}
