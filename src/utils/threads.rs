use futures::StreamExt;
use std::future::Future;

/// 以最大并发数执行一组future，结果顺序与输入顺序一致
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_parallels: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    futures::stream::iter(futures)
        .buffered(max_parallels.max(1))
        .collect()
        .await
}
