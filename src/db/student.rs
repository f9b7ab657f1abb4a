use crate::models::{Pagination, Student, StudentChange, StudentPatch};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Maximum number of rows written by one bulk `INSERT` statement
pub const BATCH_SIZE: usize = 3;

pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of students in storage order (no `ORDER BY`)
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, age, class FROM students LIMIT $1 OFFSET $2"
        )
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>("SELECT id, name, age, class FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert one student, ignoring any id it carries, and return it with the generated id
    pub async fn create(&self, student: &Student) -> Result<Student, sqlx::Error> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO students (name, age, class) VALUES ($1, $2, $3) RETURNING id"
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(student.class)
        .fetch_one(&self.pool)
        .await?;
        Ok(student.with_id(id))
    }

    /// Insert all students in one transaction, `BATCH_SIZE` rows per statement.
    ///
    /// Either every row is committed or none is: an error in any batch drops
    /// the transaction, which rolls it back.
    pub async fn create_bulk(&self, students: &[Student]) -> Result<Vec<Student>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(students.len());

        for batch in students.chunks(BATCH_SIZE) {
            let mut query = bulk_insert_query(batch);
            let ids: Vec<i32> = query
                .build_query_scalar::<i32>()
                .fetch_all(&mut *tx)
                .await?;

            inserted.extend(batch.iter().zip(ids).map(|(student, id)| student.with_id(id)));
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Overwrite name, age and class. Returns the number of rows affected,
    /// which is 0 for an unknown id.
    pub async fn update(&self, id: i32, student: &Student) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET name = $1, age = $2, class = $3 WHERE id = $4"
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(student.class)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn patch(&self, id: i32, patch: &StudentPatch) -> Result<u64, sqlx::Error> {
        if patch.is_empty() {
            return Ok(0);
        }

        let mut query = patch_query(id, patch);
        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Multi-row `INSERT ... RETURNING id` with one bind per column per row
pub fn bulk_insert_query<'a>(batch: &[Student]) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new("INSERT INTO students (name, age, class) ");
    query.push_values(batch, |mut row, student| {
        row.push_bind(student.name.clone())
            .push_bind(student.age)
            .push_bind(student.class);
    });
    query.push(" RETURNING id");
    query
}

/// `UPDATE` whose `SET` clause lists only the patched columns; the id is bound last
pub fn patch_query<'a>(id: i32, patch: &StudentPatch) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new("UPDATE students SET ");
    let mut assignments = query.separated(", ");
    for change in patch.changes() {
        assignments.push(change.column());
        assignments.push_unseparated(" = ");
        match change {
            StudentChange::Name(name) => assignments.push_bind_unseparated(name.clone()),
            StudentChange::Age(age) => assignments.push_bind_unseparated(*age),
            StudentChange::Class(class) => assignments.push_bind_unseparated(*class),
        };
    }
    query.push(" WHERE id = ").push_bind(id);
    query
}
