use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::info;

use crate::entity::{faculty, student};
use crate::error::AppError;
use crate::models::faculty::{CreateFacultyRequest, UpdateFacultyRequest};

pub struct FacultyService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FacultyService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn add(&self, req: CreateFacultyRequest) -> Result<faculty::Model, AppError> {
        let model = faculty::ActiveModel {
            name: Set(req.name),
            color: Set(req.color),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(faculty_id = model.id, "Faculty created");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<faculty::Model, AppError> {
        find_faculty(self.conn, id).await
    }

    /// Overwrite every field of an existing faculty. A request without an id
    /// creates a new faculty instead.
    pub async fn update(&self, req: UpdateFacultyRequest) -> Result<faculty::Model, AppError> {
        let Some(id) = req.id else {
            return self
                .add(CreateFacultyRequest {
                    name: req.name,
                    color: req.color,
                })
                .await;
        };

        let mut active: faculty::ActiveModel = find_faculty(self.conn, id).await?.into();
        active.name = Set(req.name);
        active.color = Set(req.color);
        let model = active.update(self.conn).await?;

        info!(faculty_id = id, "Faculty updated");
        Ok(model)
    }

    /// Find all faculties whose name or color matches, ignoring case.
    /// Absent criteria match nothing.
    ///
    /// Case folding happens here rather than in SQL: SQLite's `LOWER` only
    /// folds ASCII, so non-Latin names would never match there.
    pub async fn get_by_color_or_name(
        &self,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Vec<faculty::Model>, AppError> {
        let name = name.map(str::to_lowercase);
        let color = color.map(str::to_lowercase);
        if name.is_none() && color.is_none() {
            return Ok(Vec::new());
        }

        let matches = |wanted: &Option<String>, value: &str| {
            wanted.as_deref() == Some(value.to_lowercase().as_str())
        };

        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|f| matches(&name, &f.name) || matches(&color, &f.color))
            .collect())
    }

    pub async fn get_all(&self) -> Result<Vec<faculty::Model>, AppError> {
        Ok(faculty::Entity::find()
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_students(&self, faculty_id: i32) -> Result<Vec<student::Model>, AppError> {
        find_faculty(self.conn, faculty_id).await?;

        Ok(student::Entity::find()
            .filter(student::Column::FacultyId.eq(faculty_id))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }
}

impl<C: ConnectionTrait + TransactionTrait> FacultyService<'_, C> {
    /// Delete a faculty, detaching its students first. Returns the deleted row.
    pub async fn remove(&self, id: i32) -> Result<faculty::Model, AppError> {
        let txn = self.conn.begin().await?;

        let existing = find_faculty(&txn, id).await?;

        let detached = student::Entity::update_many()
            .col_expr(student::Column::FacultyId, Expr::value(Option::<i32>::None))
            .filter(student::Column::FacultyId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        faculty::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(faculty_id = id, detached, "Faculty deleted");
        Ok(existing)
    }
}

pub fn faculty_service(db: &DatabaseConnection) -> FacultyService<'_, DatabaseConnection> {
    FacultyService::new(db)
}

pub async fn find_faculty<C: ConnectionTrait>(db: &C, id: i32) -> Result<faculty::Model, AppError> {
    faculty::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Faculty not found".into()))
}
