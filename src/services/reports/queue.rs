/*!
 * 报表生成队列
 *
 * 创建报表时只写入 `pending` 记录并把 ID 放入有界队列，后台 worker 逐个取出：
 *
 * 1. 标记为 `processing`
 * 2. 读取报表数据并生成 XLSX，写入 `reports.output_dir`
 * 3. 成功时保存文件路径并标记为 `generated`，任何错误都标记为 `failed`
 *
 * 接口创建报表时队列已满则直接标记为 `failed`。启动时仍未完成的报表会等待队列空位重新入队，
 * 不会因容量不足被丢弃。生成期间报表被删除时，已写出的文件会被清理。
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::workbook::build_report_workbook;
use crate::errors::{Result, SchoolError};
use crate::models::reports::entities::ReportStatus;
use crate::storage::Storage;

/// 入队失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError {
    Full,
    Closed,
}

impl std::fmt::Display for EnqueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnqueueError::Full => write!(f, "Report queue is full"),
            EnqueueError::Closed => write!(f, "Report worker is not running"),
        }
    }
}

#[derive(Clone)]
pub struct ReportQueue {
    sender: mpsc::Sender<i64>,
}

impl ReportQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<i64>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// 非阻塞入队
    pub fn enqueue(&self, report_id: i64) -> std::result::Result<(), EnqueueError> {
        self.sender.try_send(report_id).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
            mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
        })
    }

    /// 等待队列空位后入队，只有 worker 已退出时才失败
    pub async fn enqueue_wait(&self, report_id: i64) -> std::result::Result<(), EnqueueError> {
        self.sender
            .send(report_id)
            .await
            .map_err(|_| EnqueueError::Closed)
    }

    /// 入队，失败时把报表标记为 failed
    pub async fn dispatch(
        &self,
        storage: &Arc<dyn Storage>,
        report_id: i64,
    ) -> std::result::Result<(), EnqueueError> {
        match self.enqueue(report_id) {
            Ok(()) => {
                debug!("Report {} queued for generation", report_id);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to queue report {}: {}", report_id, err);
                if let Err(e) = storage
                    .update_report_status(
                        report_id,
                        ReportStatus::Failed,
                        None,
                        Some(err.to_string()),
                    )
                    .await
                {
                    error!("Failed to mark report {} as failed: {}", report_id, e);
                }
                Err(err)
            }
        }
    }
}

/// 启动后台 worker，队列的发送端全部释放后退出
pub fn spawn_report_worker(
    storage: Arc<dyn Storage>,
    mut receiver: mpsc::Receiver<i64>,
    output_dir: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Report worker started, output directory: {}",
            output_dir.display()
        );
        while let Some(report_id) = receiver.recv().await {
            match generate_report(&storage, report_id, &output_dir).await {
                Ok(Some(path)) => info!("Report {} generated at {}", report_id, path),
                Ok(None) => debug!("Report {} no longer exists, skipped", report_id),
                Err(e) => {
                    error!("Report {} generation failed: {}", report_id, e);
                    if let Err(e) = storage
                        .update_report_status(
                            report_id,
                            ReportStatus::Failed,
                            None,
                            Some(e.message().to_string()),
                        )
                        .await
                    {
                        error!("Failed to mark report {} as failed: {}", report_id, e);
                    }
                }
            }
        }
        info!("Report worker stopped");
    })
}

/// 把启动前遗留的 pending 报表重新入队
pub async fn requeue_pending_reports(
    storage: &Arc<dyn Storage>,
    queue: &ReportQueue,
) -> Result<usize> {
    let ids = storage.list_pending_report_ids().await?;
    let mut queued = 0;
    for id in ids {
        match queue.enqueue_wait(id).await {
            Ok(()) => queued += 1,
            Err(err) => {
                // worker 已退出，剩余报表留待下次启动
                warn!("Stopped requeueing at report {}: {}", id, err);
                break;
            }
        }
    }
    Ok(queued)
}

/// 生成单个报表，返回文件路径；报表已被删除时返回 None
pub async fn generate_report(
    storage: &Arc<dyn Storage>,
    report_id: i64,
    output_dir: &Path,
) -> Result<Option<String>> {
    let Some(report) = storage.get_report_by_id(report_id).await? else {
        return Ok(None);
    };
    let report = report.report;

    if !storage
        .update_report_status(report_id, ReportStatus::Processing, None, None)
        .await?
    {
        return Ok(None);
    }

    let dataset = storage
        .collect_report_dataset(report.academic_year_id, report.semester.clone())
        .await?;

    let title = report.title.clone();
    let report_type = report.report_type;
    let buffer = tokio::task::spawn_blocking(move || {
        build_report_workbook(&title, report_type, &dataset)
    })
    .await
    .map_err(|e| SchoolError::report_generation(format!("Report task aborted: {e}")))?
    .map_err(|e| SchoolError::report_generation(format!("Failed to build workbook: {e}")))?;

    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        SchoolError::file_operation(format!("Failed to create report directory: {e}"))
    })?;

    let file_name = format!(
        "report_{}_{}_{}.xlsx",
        report.id,
        report.report_type,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let path = output_dir.join(file_name);
    tokio::fs::write(&path, buffer)
        .await
        .map_err(|e| SchoolError::file_operation(format!("Failed to write report file: {e}")))?;

    finish_report(storage, report_id, path.to_string_lossy().into_owned()).await
}

/// 记录生成结果；报表在生成期间被删除时删掉已写出的文件并返回 None
async fn finish_report(
    storage: &Arc<dyn Storage>,
    report_id: i64,
    path: String,
) -> Result<Option<String>> {
    let updated = match storage
        .update_report_status(report_id, ReportStatus::Generated, Some(path.clone()), None)
        .await
    {
        Ok(updated) => updated,
        Err(e) => {
            discard_report_file(report_id, &path).await;
            return Err(e);
        }
    };

    if updated {
        Ok(Some(path))
    } else {
        discard_report_file(report_id, &path).await;
        Ok(None)
    }
}

async fn discard_report_file(report_id: i64, path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(
            "Failed to remove file {} of report {}: {}",
            path, report_id, e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::{entities::ReportType, requests::CreateReportRequest};
    use crate::storage::sea_orm_storage::test_support::{memory_storage, seed_school, user_request};

    #[tokio::test]
    async fn test_enqueue_full() {
        let (queue, mut receiver) = ReportQueue::new(1);
        assert_eq!(queue.enqueue(1), Ok(()));
        assert_eq!(queue.enqueue(2), Err(EnqueueError::Full));
        assert_eq!(receiver.recv().await, Some(1));
        assert_eq!(queue.enqueue(3), Ok(()));

        drop(receiver);
        assert_eq!(queue.enqueue(4), Err(EnqueueError::Closed));
    }

    #[tokio::test]
    async fn test_generate_report_lifecycle() {
        let seaorm = memory_storage().await;
        let school = seed_school(&seaorm).await;
        let admin = seaorm
            .create_user_impl(user_request("admin@example.com", &[]))
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(seaorm);

        let report = storage
            .create_report(
                CreateReportRequest {
                    title: "Statistiques".into(),
                    report_type: ReportType::Statistics,
                    academic_year_id: school.year_id,
                    semester: None,
                    parameters: None,
                },
                admin.id,
            )
            .await
            .unwrap();

        let output_dir = std::env::temp_dir().join(format!("reports-{}", uuid::Uuid::new_v4()));
        let path = generate_report(&storage, report.id, &output_dir)
            .await
            .unwrap()
            .unwrap();

        let stored = storage.get_report_by_id(report.id).await.unwrap().unwrap();
        assert_eq!(stored.report.status, ReportStatus::Generated);
        assert_eq!(stored.report.file_path.as_deref(), Some(path.as_str()));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        assert_eq!(generate_report(&storage, 9999, &output_dir).await.unwrap(), None);
        std::fs::remove_dir_all(&output_dir).unwrap();
    }

    #[tokio::test]
    async fn test_report_deleted_during_generation_discards_file() {
        let seaorm = memory_storage().await;
        let school = seed_school(&seaorm).await;
        let admin = seaorm
            .create_user_impl(user_request("admin@example.com", &[]))
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(seaorm);

        let report = storage
            .create_report(
                CreateReportRequest {
                    title: "Inscriptions".into(),
                    report_type: ReportType::Academic,
                    academic_year_id: school.year_id,
                    semester: None,
                    parameters: None,
                },
                admin.id,
            )
            .await
            .unwrap();
        storage
            .update_report_status(report.id, ReportStatus::Processing, None, None)
            .await
            .unwrap();

        let output_dir = std::env::temp_dir().join(format!("reports-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&output_dir).unwrap();
        let path = output_dir.join("report.xlsx");
        std::fs::write(&path, b"xlsx").unwrap();

        assert!(storage.delete_report(report.id).await.unwrap());
        let finished = finish_report(&storage, report.id, path.to_string_lossy().into_owned())
            .await
            .unwrap();
        assert_eq!(finished, None);
        assert!(!path.exists());

        // 已删除的报表不会再生成文件
        assert_eq!(generate_report(&storage, report.id, &output_dir).await.unwrap(), None);
        assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
        std::fs::remove_dir_all(&output_dir).unwrap();
    }

    #[tokio::test]
    async fn test_requeue_waits_for_capacity() {
        let seaorm = memory_storage().await;
        let school = seed_school(&seaorm).await;
        let admin = seaorm
            .create_user_impl(user_request("admin@example.com", &[]))
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(seaorm);

        let mut ids = Vec::new();
        for i in 0..5 {
            let report = storage
                .create_report(
                    CreateReportRequest {
                        title: format!("Notes {i}"),
                        report_type: ReportType::Statistics,
                        academic_year_id: school.year_id,
                        semester: None,
                        parameters: None,
                    },
                    admin.id,
                )
                .await
                .unwrap();
            ids.push(report.id);
        }

        let output_dir = std::env::temp_dir().join(format!("reports-{}", uuid::Uuid::new_v4()));
        let (queue, receiver) = ReportQueue::new(2);
        let worker = spawn_report_worker(storage.clone(), receiver, output_dir.clone());

        assert_eq!(requeue_pending_reports(&storage, &queue).await.unwrap(), 5);

        drop(queue);
        worker.await.unwrap();
        for id in ids {
            let stored = storage.get_report_by_id(id).await.unwrap().unwrap();
            assert_eq!(stored.report.status, ReportStatus::Generated);
        }
        assert!(storage.list_pending_report_ids().await.unwrap().is_empty());
        std::fs::remove_dir_all(&output_dir).unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_marks_failed_when_full() {
        let seaorm = memory_storage().await;
        let school = seed_school(&seaorm).await;
        let admin = seaorm
            .create_user_impl(user_request("admin@example.com", &[]))
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(seaorm);

        let request = || CreateReportRequest {
            title: "Finances".into(),
            report_type: ReportType::Financial,
            academic_year_id: school.year_id,
            semester: Some("S1".into()),
            parameters: None,
        };
        let first = storage.create_report(request(), admin.id).await.unwrap();
        let second = storage.create_report(request(), admin.id).await.unwrap();

        let (queue, _receiver) = ReportQueue::new(1);
        assert!(queue.dispatch(&storage, first.id).await.is_ok());
        assert_eq!(
            queue.dispatch(&storage, second.id).await,
            Err(EnqueueError::Full)
        );

        let failed = storage.get_report_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(failed.report.status, ReportStatus::Failed);
        assert_eq!(
            storage.list_pending_report_ids().await.unwrap(),
            vec![first.id]
        );
    }
}
